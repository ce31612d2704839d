//! Container error types.

use thiserror::Error;

/// Errors reported by the fallible container operations.
///
/// The infallible forms (`reserve`, `insert`, `erase`, `at`, ...) panic
/// on the same conditions instead.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum VtdError {
    /// The requested capacity does not fit in the address space.
    #[error("capacity overflow")]
    CapacityOverflow,
    /// The allocator returned null.
    #[error("allocation of {bytes} bytes (align {align}) failed")]
    AllocationFailed {
        /// Size of the failed request in bytes.
        bytes: usize,
        /// Alignment of the failed request in bytes.
        align: usize,
    },
    /// A position outside the valid range for the operation.
    #[error("position {pos} out of bounds for length {len}")]
    PositionOutOfBounds {
        /// The rejected position.
        pos: usize,
        /// Length of the container at the time of the call.
        len: usize,
    },
    /// A fixed array of non-zero size was seeded from an empty sequence.
    #[error("cannot seed a fixed array of {size} elements from an empty sequence")]
    EmptySequence {
        /// The array's compile-time size.
        size: usize,
    },
}
