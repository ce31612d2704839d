//! Graphics-device lifecycle events delivered by the host.

/// A lifecycle event from the host's graphics device.
///
/// Raw tags follow `UnityGfxDeviceEventType`. Tags outside the known set
/// decode to [`DeviceEvent::Unrecognized`], which the plugin ignores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeviceEvent {
    /// The device was created; the active renderer can be queried.
    Initialize,
    /// The device is being destroyed.
    Shutdown,
    /// The device is about to be reset.
    BeforeReset,
    /// The device finished resetting.
    AfterReset,
    /// Any tag the plugin does not handle.
    Unrecognized(i32),
}

impl DeviceEvent {
    /// Number of known (non-`Unrecognized`) event kinds.
    pub const KNOWN: usize = 4;

    /// Decode a raw host tag.
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            0 => Self::Initialize,
            1 => Self::Shutdown,
            2 => Self::BeforeReset,
            3 => Self::AfterReset,
            other => Self::Unrecognized(other),
        }
    }

    /// Encode back into the host's raw tag.
    pub const fn as_raw(self) -> i32 {
        match self {
            Self::Initialize => 0,
            Self::Shutdown => 1,
            Self::BeforeReset => 2,
            Self::AfterReset => 3,
            Self::Unrecognized(raw) => raw,
        }
    }

    /// Dense index in `0..KNOWN` for known events, `None` otherwise.
    pub const fn index(self) -> Option<usize> {
        match self {
            Self::Initialize => Some(0),
            Self::Shutdown => Some(1),
            Self::BeforeReset => Some(2),
            Self::AfterReset => Some(3),
            Self::Unrecognized(_) => None,
        }
    }
}

impl From<i32> for DeviceEvent {
    fn from(raw: i32) -> Self {
        Self::from_raw(raw)
    }
}
