//! Renderer-backend identifiers reported by the host graphics interface.

use std::fmt;

/// The graphics backend the host is currently rendering with.
///
/// Discriminants follow the host's `UnityGfxRenderer` enumeration so that
/// [`RendererKind::as_raw`] can be handed straight back across the C
/// boundary. Values the plugin does not know about are preserved verbatim
/// in [`RendererKind::Other`] rather than collapsed to `Null`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RendererKind {
    /// Direct3D 11.
    D3D11,
    /// No graphics device (batch mode, or before initialisation).
    #[default]
    Null,
    /// OpenGL ES 2.0.
    OpenGLES20,
    /// OpenGL ES 3.x.
    OpenGLES30,
    /// PlayStation Vita.
    Gxm,
    /// PlayStation 4.
    Ps4,
    /// Xbox One (Direct3D 11).
    XboxOne,
    /// Apple Metal.
    Metal,
    /// Desktop OpenGL core profile.
    OpenGLCore,
    /// Direct3D 12.
    D3D12,
    /// Vulkan.
    Vulkan,
    /// Nintendo Switch.
    Nvn,
    /// Xbox One (Direct3D 12).
    XboxOneD3D12,
    /// A backend identifier this plugin does not recognise.
    Other(i32),
}

impl RendererKind {
    /// Decode a raw host identifier.
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            2 => Self::D3D11,
            4 => Self::Null,
            8 => Self::OpenGLES20,
            11 => Self::OpenGLES30,
            12 => Self::Gxm,
            13 => Self::Ps4,
            14 => Self::XboxOne,
            16 => Self::Metal,
            17 => Self::OpenGLCore,
            18 => Self::D3D12,
            21 => Self::Vulkan,
            22 => Self::Nvn,
            23 => Self::XboxOneD3D12,
            other => Self::Other(other),
        }
    }

    /// Encode back into the host's raw identifier.
    pub const fn as_raw(self) -> i32 {
        match self {
            Self::D3D11 => 2,
            Self::Null => 4,
            Self::OpenGLES20 => 8,
            Self::OpenGLES30 => 11,
            Self::Gxm => 12,
            Self::Ps4 => 13,
            Self::XboxOne => 14,
            Self::Metal => 16,
            Self::OpenGLCore => 17,
            Self::D3D12 => 18,
            Self::Vulkan => 21,
            Self::Nvn => 22,
            Self::XboxOneD3D12 => 23,
            Self::Other(raw) => raw,
        }
    }

    /// `true` for the "no active backend" sentinel.
    pub const fn is_null(self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<i32> for RendererKind {
    fn from(raw: i32) -> Self {
        Self::from_raw(raw)
    }
}

impl From<RendererKind> for i32 {
    fn from(kind: RendererKind) -> Self {
        kind.as_raw()
    }
}

impl fmt::Display for RendererKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::D3D11 => write!(f, "Direct3D 11"),
            Self::Null => write!(f, "null"),
            Self::OpenGLES20 => write!(f, "OpenGL ES 2.0"),
            Self::OpenGLES30 => write!(f, "OpenGL ES 3.x"),
            Self::Gxm => write!(f, "GXM"),
            Self::Ps4 => write!(f, "PS4"),
            Self::XboxOne => write!(f, "Xbox One"),
            Self::Metal => write!(f, "Metal"),
            Self::OpenGLCore => write!(f, "OpenGL Core"),
            Self::D3D12 => write!(f, "Direct3D 12"),
            Self::Vulkan => write!(f, "Vulkan"),
            Self::Nvn => write!(f, "NVN"),
            Self::XboxOneD3D12 => write!(f, "Xbox One (Direct3D 12)"),
            Self::Other(raw) => write!(f, "unknown renderer {raw}"),
        }
    }
}
