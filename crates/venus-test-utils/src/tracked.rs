//! Drop-accounting element type for container lifecycle tests.
//!
//! Every [`Tracked`] value made by a [`DropTracker`] (directly or by
//! cloning) is counted as live until it drops. A container that
//! destroys each element exactly once leaves the tracker at zero live
//! values once the container itself is gone; a double drop drives the
//! count negative and a leak leaves it positive.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::Balance;

/// Source of [`Tracked`] values sharing one set of counters.
#[derive(Clone, Default)]
pub struct DropTracker {
    live: Balance,
    drops: Arc<AtomicUsize>,
}

impl DropTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a new live value.
    pub fn make(&self, value: i64) -> Tracked {
        self.live.acquire();
        Tracked {
            value,
            live: self.live.clone(),
            drops: self.drops.clone(),
        }
    }

    /// Values currently alive. Negative means something dropped twice.
    pub fn live(&self) -> isize {
        self.live.get()
    }

    /// Total drops observed.
    pub fn drops(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }
}

/// A value that reports its construction and destruction to a [`DropTracker`].
#[derive(Debug)]
pub struct Tracked {
    pub value: i64,
    live: Balance,
    drops: Arc<AtomicUsize>,
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.live.acquire();
        Self {
            value: self.value,
            live: self.live.clone(),
            drops: self.drops.clone(),
        }
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.live.release();
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}
