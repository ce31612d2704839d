//! Unity native plugin entry points for Venus.
//!
//! The host loads this library as a `cdylib` and calls the exported
//! functions in [`plugin`] and [`host_log`]. Everything behind them is
//! safe Rust in `venus-plugin`; this crate only translates the host's
//! function tables into the capability traits of `venus-core`, keeps the
//! one loaded context in a global slot, and stops panics at the boundary.
//!
//! This crate is one of two that may contain `unsafe` code (along with
//! `venus-vtd`).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

/// Run an exported function body, returning `$fallback` if it panics.
///
/// The body is a block evaluated inside a closure, so `return` leaves
/// the body, not the enclosing function.
macro_rules! ffi_guard_or {
    ($fallback:expr, $body:block) => {{
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| $body)) {
            Ok(value) => value,
            Err(_) => {
                log::error!("panic caught at the host boundary");
                $fallback
            }
        }
    }};
}

/// `ffi_guard_or!` for functions returning nothing.
macro_rules! ffi_guard {
    ($body:block) => {
        ffi_guard_or!((), $body)
    };
}

/// Lock a mutex, recovering the guard if a previous holder panicked.
///
/// Every guarded value is consistent between statements, so poison
/// carries no information worth failing on.
macro_rules! ffi_lock {
    ($mutex:expr) => {
        match $mutex.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    };
}

pub mod host_log;
pub mod plugin;
pub mod unity;

pub use host_log::{InitLogFunc, TermLogFunc};
pub use plugin::{GetTestInteger, UnityPluginLoad, UnityPluginUnload};
