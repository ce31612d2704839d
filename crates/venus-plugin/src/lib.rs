//! Host-independent plugin lifecycle and logging for the Venus native plugin.
//!
//! [`PluginContext`] is the plugin's whole state: it is built once when
//! the host loads the library, receives device events while loaded, and
//! unregisters itself when dropped. It reaches the host only through the
//! capability traits in `venus-core`, so the same code runs against the
//! real host ABI (see `venus-ffi`) and against in-process mocks.
//!
//! [`HostLogger`] bridges the `log` facade to a host-supplied
//! [`LogSink`](venus_core::LogSink).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod context;
pub mod logger;

pub use config::PluginConfig;
pub use context::{EventOutcome, PluginContext};
pub use logger::HostLogger;
