//! Core types and traits for the Venus native plugin.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the plugin context and the FFI layer:
//! renderer identifiers, device lifecycle events, plugin errors, and
//! the capability traits through which the host is reached.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod event;
pub mod renderer;
pub mod traits;

pub use error::PluginError;
pub use event::DeviceEvent;
pub use renderer::RendererKind;
pub use traits::{GraphicsInterface, InterfaceRegistry, LogSink};
