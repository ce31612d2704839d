//! Plugin configuration parameters.

use log::LevelFilter;

/// Configuration for a [`PluginContext`](crate::PluginContext).
///
/// Fixed at load; the FFI layer uses [`PluginConfig::default`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PluginConfig {
    /// Most verbose level forwarded to the host log sink.
    ///
    /// Default: `Info`.
    pub log_level: LevelFilter,

    /// Process an `Initialize` device event immediately after loading.
    ///
    /// The host usually creates its graphics device before loading native
    /// plugins, so the registration alone would never see that event.
    /// Default: `true`.
    pub initialize_on_load: bool,

    /// How many recent device events to retain for diagnostics.
    ///
    /// Zero disables the history. Default: 16.
    pub event_history: usize,
}

impl PluginConfig {
    /// Default log level forwarded to the host.
    pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

    /// Default device-event history length.
    pub const DEFAULT_EVENT_HISTORY: usize = 16;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            log_level: Self::DEFAULT_LOG_LEVEL,
            initialize_on_load: true,
            event_history: Self::DEFAULT_EVENT_HISTORY,
        }
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self::new()
    }
}
