//! Growable and fixed-size array containers for the Venus native plugin.
//!
//! Two containers share one access contract:
//!
//! - [`DynArray`]: an owning, contiguous, growable sequence. Capacity is
//!   always a multiple of [`GrowthPolicy::GRANULARITY`]; appends grow by
//!   1.5× (never less than requested); insert and erase shift elements
//!   in place.
//! - [`FixedArray`]: exactly `N` inline elements, always constructed, with
//!   "hold last value" backfill when seeded from a shorter sequence.
//!
//! # Bounds
//!
//! Out-of-range positions are contract violations. Every accessor checks
//! them in all build profiles and panics with the offending index; the
//! `get`/`try_*` forms report them as `None` or [`VtdError`] instead.
//!
//! # Safety
//!
//! This crate is one of two that may contain `unsafe` code (along with
//! `venus-ffi`). Raw allocation lives in the private `raw` module; the
//! uninitialised-slot handling of [`DynArray`] lives in `dyn_array`.
//! Every `unsafe` block carries a `// SAFETY:` comment.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod config;
pub mod dyn_array;
pub mod error;
pub mod fixed_array;
mod raw;

pub use config::GrowthPolicy;
pub use dyn_array::DynArray;
pub use error::VtdError;
pub use fixed_array::FixedArray;
