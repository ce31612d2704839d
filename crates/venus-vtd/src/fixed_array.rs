//! Fixed-size inline array.

use std::ops::{Deref, DerefMut};
use std::slice;

use crate::error::VtdError;

/// Exactly `N` elements stored inline, all always constructed.
///
/// There is no length separate from `N` and no growth. Clone, move and
/// assignment are element-wise over all `N` slots.
///
/// ```
/// use venus_vtd::FixedArray;
///
/// let a: FixedArray<i32, 4> = FixedArray::from_seq(&[7, 8]).unwrap();
/// assert_eq!(a.as_slice(), &[7, 8, 8, 8]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FixedArray<T, const N: usize> {
    buf: [T; N],
}

impl<T, const N: usize> FixedArray<T, N> {
    /// The compile-time element count.
    pub const SIZE: usize = N;

    /// Build each slot from its index.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(usize) -> T,
    {
        Self {
            buf: std::array::from_fn(f),
        }
    }

    /// Number of elements. Always `N`.
    pub const fn size(&self) -> usize {
        N
    }

    /// Element at `index`, or `None` if `index >= N`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.buf.get(index)
    }

    /// Mutable element at `index`, or `None` if `index >= N`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.buf.get_mut(index)
    }

    /// Element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    #[track_caller]
    pub fn at(&self, index: usize) -> &T {
        match self.buf.get(index) {
            Some(v) => v,
            None => index_out_of_bounds(index, N),
        }
    }

    /// Mutable element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    #[track_caller]
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        match self.buf.get_mut(index) {
            Some(v) => v,
            None => index_out_of_bounds(index, N),
        }
    }

    /// All elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.buf
    }

    /// All elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.buf
    }

    /// Unwrap into the underlying array.
    pub fn into_inner(self) -> [T; N] {
        self.buf
    }
}

impl<T: Default, const N: usize> FixedArray<T, N> {
    /// Every slot default-constructed.
    pub fn new() -> Self {
        Self::from_fn(|_| T::default())
    }
}

impl<T: Clone, const N: usize> FixedArray<T, N> {
    /// Every slot a clone of `value`.
    pub fn filled(value: &T) -> Self {
        Self::from_fn(|_| value.clone())
    }

    /// Fill slots positionally from `seq`, repeating its last element for
    /// any slots past its end. Elements beyond `N` are ignored.
    ///
    /// Returns [`VtdError::EmptySequence`] if `seq` is empty and `N > 0`.
    pub fn from_seq(seq: &[T]) -> Result<Self, VtdError> {
        if seq.is_empty() && N > 0 {
            return Err(VtdError::EmptySequence { size: N });
        }
        let last = seq.len().saturating_sub(1);
        Ok(Self::from_fn(|i| seq[i.min(last)].clone()))
    }

    /// Overwrite every slot with a clone of `value`.
    pub fn fill(&mut self, value: &T) {
        self.buf.fill(value.clone());
    }
}

#[cold]
#[track_caller]
fn index_out_of_bounds(index: usize, size: usize) -> ! {
    panic!("index {index} out of bounds for FixedArray of size {size}")
}

impl<T: Default, const N: usize> Default for FixedArray<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> From<[T; N]> for FixedArray<T, N> {
    fn from(buf: [T; N]) -> Self {
        Self { buf }
    }
}

impl<T, const N: usize> Deref for FixedArray<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.buf
    }
}

impl<T, const N: usize> DerefMut for FixedArray<T, N> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.buf
    }
}

impl<T, const N: usize> AsRef<[T]> for FixedArray<T, N> {
    fn as_ref(&self) -> &[T] {
        &self.buf
    }
}

impl<T, const N: usize> IntoIterator for FixedArray<T, N> {
    type Item = T;
    type IntoIter = std::array::IntoIter<T, N>;

    fn into_iter(self) -> Self::IntoIter {
        self.buf.into_iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a FixedArray<T, N> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buf.iter()
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a mut FixedArray<T, N> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buf.iter_mut()
    }
}
