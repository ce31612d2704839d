//! Capability traits through which the plugin reaches its host.
//!
//! The host owns the graphics device and the log output. The plugin only
//! ever sees these narrow capabilities, injected at load time, so the
//! same plugin context runs against the real host ABI and against
//! in-process mocks.

use std::ffi::CStr;

use crate::renderer::RendererKind;

/// The host's graphics subsystem.
pub trait GraphicsInterface: Send {
    /// The backend the host is currently rendering with.
    fn renderer(&self) -> RendererKind;

    /// Start delivering device events to the plugin.
    fn register_device_events(&self);

    /// Stop delivering device events to the plugin.
    ///
    /// Called exactly once, when the owning context is dropped.
    fn unregister_device_events(&self);
}

/// The host's interface registry, consulted once at load.
pub trait InterfaceRegistry {
    /// Look up the graphics subsystem, if the host exposes one.
    fn graphics(&self) -> Option<Box<dyn GraphicsInterface>>;
}

/// A host-supplied sink for null-terminated log messages.
pub trait LogSink: Send + Sync {
    /// Deliver one message.
    fn write(&self, message: &CStr);
}
