//! Deterministic workloads for benchmarking the Venus containers.
//!
//! - [`mixed_ops`]: a seeded sequence of push/insert/erase/pop operations
//! - [`apply_dyn`] / [`apply_vec`]: replay a sequence on `DynArray` or `Vec`

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use venus_vtd::DynArray;

/// One container operation. Positions are reduced modulo the current
/// length at replay time, so every sequence is valid for any container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    /// Append a value.
    Push(u64),
    /// Insert a value at `pos % (len + 1)`.
    Insert(usize, u64),
    /// Erase at `pos % len`; skipped when empty.
    Erase(usize),
    /// Remove the last element.
    Pop,
}

/// Generate `n` operations from `seed`, biased towards growth
/// (roughly half pushes, a quarter inserts).
pub fn mixed_ops(seed: u64, n: usize) -> Vec<Op> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            let value = rng.next_u64();
            let pos = rng.next_u32() as usize;
            match rng.next_u32() % 8 {
                0..=3 => Op::Push(value),
                4 | 5 => Op::Insert(pos, value),
                6 => Op::Erase(pos),
                _ => Op::Pop,
            }
        })
        .collect()
}

/// Replay `ops` on a fresh [`DynArray`].
pub fn apply_dyn(ops: &[Op]) -> DynArray<u64> {
    let mut a = DynArray::new();
    for &op in ops {
        match op {
            Op::Push(v) => a.push_back(v),
            Op::Insert(pos, v) => {
                let at = pos % (a.len() + 1);
                a.insert(at, v);
            }
            Op::Erase(pos) => {
                if !a.is_empty() {
                    let at = pos % a.len();
                    a.erase(at);
                }
            }
            Op::Pop => {
                a.pop_back();
            }
        }
    }
    a
}

/// Replay `ops` on a fresh `Vec`, for comparison.
pub fn apply_vec(ops: &[Op]) -> Vec<u64> {
    let mut v = Vec::new();
    for &op in ops {
        match op {
            Op::Push(x) => v.push(x),
            Op::Insert(pos, x) => {
                let at = pos % (v.len() + 1);
                v.insert(at, x);
            }
            Op::Erase(pos) => {
                if !v.is_empty() {
                    let at = pos % v.len();
                    v.remove(at);
                }
            }
            Op::Pop => {
                v.pop();
            }
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_ops() {
        assert_eq!(mixed_ops(7, 100), mixed_ops(7, 100));
        assert_ne!(mixed_ops(7, 100), mixed_ops(8, 100));
    }

    #[test]
    fn dyn_array_and_vec_agree() {
        let ops = mixed_ops(42, 2_000);
        assert_eq!(apply_dyn(&ops).as_slice(), apply_vec(&ops).as_slice());
    }
}
