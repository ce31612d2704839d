//! Capacity growth parameters shared by every [`DynArray`](crate::DynArray).

/// Capacity rounding and growth rules.
///
/// Capacities are always a multiple of [`GRANULARITY`](Self::GRANULARITY).
/// When an append or resize outgrows the allocation, the new capacity is
/// the larger of 1.5× the current length and the requested length,
/// rounded up to the granularity.
#[derive(Clone, Copy, Debug)]
pub struct GrowthPolicy;

impl GrowthPolicy {
    /// Rounding unit for allocated capacity, in elements.
    pub const GRANULARITY: usize = 16;

    /// Round `n` up to the next multiple of [`GRANULARITY`](Self::GRANULARITY).
    ///
    /// Returns `None` if the rounded value does not fit in `usize`.
    pub const fn round_up(n: usize) -> Option<usize> {
        match n.checked_add(Self::GRANULARITY - 1) {
            Some(v) => Some(v / Self::GRANULARITY * Self::GRANULARITY),
            None => None,
        }
    }

    /// Capacity to request when `len` live elements must grow to `requested`.
    ///
    /// This is the pre-rounding value: `max(len + len / 2, requested)`.
    pub const fn grown_capacity(len: usize, requested: usize) -> usize {
        let amortized = len.saturating_add(len / 2);
        if amortized > requested {
            amortized
        } else {
            requested
        }
    }
}
