//! Venus: a Unity native rendering plugin and the containers it is built on.
//!
//! This is the top-level facade crate that re-exports the Rust API of the
//! Venus sub-crates. The host-loadable library itself is `venus-ffi`.
//!
//! # Quick start
//!
//! ```rust
//! use venus::prelude::*;
//! use venus_test_utils::{MockGraphics, MockRegistry};
//!
//! // Containers.
//! let mut a: DynArray<i32> = [1, 2, 3, 4].into();
//! a.insert(2, 99);
//! assert_eq!(a.as_slice(), &[1, 2, 99, 3, 4]);
//! assert_eq!(a.capacity(), 16);
//!
//! let f: FixedArray<i32, 4> = FixedArray::from_seq(&[7, 8]).unwrap();
//! assert_eq!(f.as_slice(), &[7, 8, 8, 8]);
//!
//! // Plugin lifecycle against an in-process host.
//! let graphics = MockGraphics::new(RendererKind::Metal);
//! let ctx = PluginContext::load(&MockRegistry::new(graphics), PluginConfig::default()).unwrap();
//! assert_eq!(ctx.renderer(), RendererKind::Metal);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `venus-core` | Renderer ids, device events, host capability traits |
//! | [`vtd`] | `venus-vtd` | `DynArray`, `FixedArray`, growth policy |
//! | [`plugin`] | `venus-plugin` | Plugin context, host logger, config |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Renderer ids, device events and host capability traits (`venus-core`).
pub use venus_core as types;

/// Containers (`venus-vtd`).
///
/// [`vtd::DynArray`] grows in multiples of 16 slots; [`vtd::FixedArray`]
/// backfills short initialisers with their last value.
pub use venus_vtd as vtd;

/// Plugin lifecycle and logging (`venus-plugin`).
pub use venus_plugin as plugin;

/// Common imports for typical Venus usage.
pub mod prelude {
    // Core
    pub use venus_core::{
        DeviceEvent, GraphicsInterface, InterfaceRegistry, LogSink, PluginError, RendererKind,
    };

    // Containers
    pub use venus_vtd::{DynArray, FixedArray, VtdError};

    // Plugin
    pub use venus_plugin::{EventOutcome, HostLogger, PluginConfig, PluginContext};
}
