//! Error types for the plugin lifecycle.

use thiserror::Error;

/// Errors raised while bringing the plugin up against a host.
///
/// The FFI layer never surfaces these to the host; it logs them and
/// leaves the plugin unloaded.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PluginError {
    /// The host's interface registry did not provide a graphics interface.
    #[error("host did not provide a graphics interface")]
    GraphicsUnavailable,
    /// The host passed a null interface registry.
    #[error("host interface registry is null")]
    NullRegistry,
}
