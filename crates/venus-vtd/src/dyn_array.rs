//! Growable contiguous array with granular capacity.
//!
//! A [`DynArray`] owns a single allocation of `capacity` slots, of which
//! the first `len` hold live elements and the rest are uninitialised.
//! Capacity only ever changes through [`reserve`](DynArray::reserve)
//! (including the implicit growth of appends and resizes) and
//! [`shrink_to_fit`](DynArray::shrink_to_fit), and is always a multiple
//! of [`GrowthPolicy::GRANULARITY`].
//!
//! # Pointer invalidation
//!
//! Any operation that changes capacity relocates the elements. Raw
//! pointers from [`as_ptr`](DynArray::as_ptr) taken before such an
//! operation dangle afterwards. References cannot outlive it at all:
//!
//! ```compile_fail
//! use venus_vtd::DynArray;
//!
//! let mut a: DynArray<i32> = DynArray::new();
//! a.push_back(1);
//! let first = &a[0];
//! a.push_back(2);
//! assert_eq!(*first, 1);
//! ```

#![allow(unsafe_code)]

use std::alloc::{handle_alloc_error, Layout};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr;
use std::slice;

use crate::config::GrowthPolicy;
use crate::error::VtdError;
use crate::raw::RawBuf;

/// An owning, contiguous, growable sequence.
///
/// Appends are amortized O(1); [`insert`](Self::insert) and
/// [`erase`](Self::erase) are O(n) in the number of elements after the
/// position. Element access goes through [`Deref<Target = [T]>`](Deref)
/// or the checked [`at`](Self::at) family.
///
/// ```
/// use venus_vtd::DynArray;
///
/// let mut a = DynArray::new();
/// for v in [1, 2, 3, 4] {
///     a.push_back(v);
/// }
/// assert_eq!(a.capacity(), 16);
///
/// let at = a.insert(2, 99);
/// assert_eq!(a.as_slice(), &[1, 2, 99, 3, 4]);
/// a.erase(at);
/// assert_eq!(a.as_slice(), &[1, 2, 3, 4]);
/// ```
pub struct DynArray<T> {
    buf: RawBuf<T>,
    len: usize,
}

// SAFETY: DynArray owns its elements exactly like Vec<T> does; sending or
// sharing it is sound whenever sending or sharing T is.
unsafe impl<T: Send> Send for DynArray<T> {}
// SAFETY: see above.
unsafe impl<T: Sync> Sync for DynArray<T> {}

impl<T> DynArray<T> {
    /// Create an empty array. Does not allocate.
    pub const fn new() -> Self {
        Self {
            buf: RawBuf::new(),
            len: 0,
        }
    }

    /// Create an empty array with room for at least `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut a = Self::new();
        a.reserve(capacity);
        a
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of allocated slots. Always a multiple of the granularity.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// `true` if there are no live elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pointer to the first slot.
    ///
    /// Dangling (but non-null and aligned) while capacity is zero.
    /// Invalidated by any capacity change.
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr()
    }

    /// Mutable pointer to the first slot. Same validity as [`as_ptr`](Self::as_ptr).
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr()
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` slots are initialised and the pointer is
        // non-null and aligned even when nothing is allocated.
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as for `as_slice`; `&mut self` guarantees uniqueness.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    // ── Capacity ────────────────────────────────────────────────

    /// Ensure capacity for at least `capacity` elements in total.
    ///
    /// The request is rounded up to the granularity. If that exceeds the
    /// current capacity the elements move to a new allocation of exactly
    /// the rounded size. Never shrinks.
    ///
    /// # Panics
    ///
    /// Panics if the rounded size overflows. Aborts via
    /// [`handle_alloc_error`] if the allocator fails.
    pub fn reserve(&mut self, capacity: usize) {
        if let Err(e) = self.try_reserve(capacity) {
            fail(e);
        }
    }

    /// Fallible form of [`reserve`](Self::reserve). On error the array is unchanged.
    pub fn try_reserve(&mut self, capacity: usize) -> Result<(), VtdError> {
        let target = GrowthPolicy::round_up(capacity).ok_or(VtdError::CapacityOverflow)?;
        if target > self.buf.capacity() {
            self.buf.try_reallocate(target, self.len)?;
        }
        Ok(())
    }

    /// Reduce capacity to the length rounded up to the granularity.
    ///
    /// An empty array releases its allocation entirely.
    pub fn shrink_to_fit(&mut self) {
        let result = if self.len == 0 {
            self.buf.try_reallocate(0, 0)
        } else {
            // len <= capacity, which is itself a rounded value, so this
            // cannot overflow.
            let target = GrowthPolicy::round_up(self.len).unwrap_or(self.buf.capacity());
            if target == self.buf.capacity() {
                return;
            }
            self.buf.try_reallocate(target, self.len)
        };
        if let Err(e) = result {
            fail(e);
        }
    }

    /// Grow capacity so that `new_len` elements fit, using the 1.5× rule.
    fn grow_for(&mut self, new_len: usize) {
        if new_len > self.buf.capacity() {
            self.reserve(GrowthPolicy::grown_capacity(self.len, new_len));
        }
    }

    // ── Length ──────────────────────────────────────────────────

    /// Resize to `new_len`, constructing new elements from `f`.
    ///
    /// Growing past capacity first reserves `max(len + len / 2, new_len)`.
    /// Shrinking drops the elements in `[new_len, len)`. Capacity is never
    /// reduced.
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F)
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        self.grow_for(new_len);
        while self.len < new_len {
            let value = f();
            // SAFETY: len < new_len <= capacity, and the slot is uninitialised.
            unsafe { self.buf.ptr().add(self.len).write(value) };
            self.len += 1;
        }
    }

    /// Drop every element at or beyond `new_len`. No-op if `new_len >= len`.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail = ptr::slice_from_raw_parts_mut(
            // SAFETY: new_len < len <= capacity.
            unsafe { self.buf.ptr().add(new_len) },
            self.len - new_len,
        );
        // Shorten first so a panicking destructor cannot cause a double drop.
        self.len = new_len;
        // SAFETY: the tail slots were live and are no longer counted.
        unsafe { ptr::drop_in_place(tail) };
    }

    /// Drop every element. Capacity is retained.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Append `value` as the new last element.
    pub fn push_back(&mut self, value: T) {
        self.grow_for(self.len + 1);
        // SAFETY: grow_for guarantees len < capacity; the slot is uninitialised.
        unsafe { self.buf.ptr().add(self.len).write(value) };
        self.len += 1;
    }

    /// Remove and return the last element, or `None` if empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: the slot at the old last index was live and is no longer counted.
        Some(unsafe { self.buf.ptr().add(self.len).read() })
    }

    /// Insert `value` at `pos`, shifting later elements toward the end.
    ///
    /// `pos == len()` appends. Returns the position of the inserted element.
    ///
    /// # Panics
    ///
    /// Panics if `pos > len()`.
    #[track_caller]
    pub fn insert(&mut self, pos: usize, value: T) -> usize {
        if pos > self.len {
            position_out_of_bounds(pos, self.len);
        }
        if pos == self.len {
            self.push_back(value);
            return self.len - 1;
        }
        self.grow_for(self.len + 1);
        // SAFETY: pos < len < capacity after growth. `ptr::copy` handles the
        // overlapping shift of [pos, len) one slot up, after which slot `pos`
        // holds a stale bitwise duplicate that is overwritten without drop.
        unsafe {
            let at = self.buf.ptr().add(pos);
            ptr::copy(at, at.add(1), self.len - pos);
            at.write(value);
        }
        self.len += 1;
        pos
    }

    /// Fallible form of [`insert`](Self::insert).
    ///
    /// On error the array is unchanged and `value` is dropped.
    pub fn try_insert(&mut self, pos: usize, value: T) -> Result<usize, VtdError> {
        if pos > self.len {
            return Err(VtdError::PositionOutOfBounds { pos, len: self.len });
        }
        Ok(self.insert(pos, value))
    }

    /// Remove and return the element at `pos`, shifting later elements
    /// toward the beginning.
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len()`.
    #[track_caller]
    pub fn remove(&mut self, pos: usize) -> T {
        if pos >= self.len {
            position_out_of_bounds(pos, self.len);
        }
        // SAFETY: pos < len so the slot is live. After reading it out, the
        // (len - pos - 1) elements above are shifted down over it, leaving a
        // stale duplicate at the old last index which stops being counted.
        unsafe {
            let at = self.buf.ptr().add(pos);
            let value = at.read();
            ptr::copy(at.add(1), at, self.len - pos - 1);
            self.len -= 1;
            value
        }
    }

    /// Drop the element at `pos`, shifting later elements toward the
    /// beginning. Returns `pos`, which now names the following element
    /// (or equals `len()`).
    ///
    /// # Panics
    ///
    /// Panics if `pos >= len()`.
    #[track_caller]
    pub fn erase(&mut self, pos: usize) -> usize {
        drop(self.remove(pos));
        pos
    }

    /// Fallible form of [`erase`](Self::erase).
    pub fn try_erase(&mut self, pos: usize) -> Result<usize, VtdError> {
        if pos >= self.len {
            return Err(VtdError::PositionOutOfBounds { pos, len: self.len });
        }
        Ok(self.erase(pos))
    }

    /// Move the contents out, leaving this array empty with no allocation.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    // ── Access ──────────────────────────────────────────────────

    /// Element at `index`, or `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Mutable element at `index`, or `None` if out of bounds.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[track_caller]
    pub fn at(&self, index: usize) -> &T {
        let len = self.len;
        match self.get(index) {
            Some(v) => v,
            None => index_out_of_bounds(index, len),
        }
    }

    /// Mutable element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[track_caller]
    pub fn at_mut(&mut self, index: usize) -> &mut T {
        let len = self.len;
        match self.get_mut(index) {
            Some(v) => v,
            None => index_out_of_bounds(index, len),
        }
    }

    /// First element.
    ///
    /// # Panics
    ///
    /// Panics if empty.
    #[track_caller]
    pub fn front(&self) -> &T {
        match self.as_slice().first() {
            Some(v) => v,
            None => empty_access("front"),
        }
    }

    /// Mutable first element.
    ///
    /// # Panics
    ///
    /// Panics if empty.
    #[track_caller]
    pub fn front_mut(&mut self) -> &mut T {
        match self.as_mut_slice().first_mut() {
            Some(v) => v,
            None => empty_access("front_mut"),
        }
    }

    /// Last element.
    ///
    /// # Panics
    ///
    /// Panics if empty.
    #[track_caller]
    pub fn back(&self) -> &T {
        match self.as_slice().last() {
            Some(v) => v,
            None => empty_access("back"),
        }
    }

    /// Mutable last element.
    ///
    /// # Panics
    ///
    /// Panics if empty.
    #[track_caller]
    pub fn back_mut(&mut self) -> &mut T {
        match self.as_mut_slice().last_mut() {
            Some(v) => v,
            None => empty_access("back_mut"),
        }
    }
}

impl<T: Default> DynArray<T> {
    /// Create an array of `len` default-constructed elements.
    pub fn with_len(len: usize) -> Self {
        let mut a = Self::new();
        a.resize(len);
        a
    }

    /// Resize to `new_len`, default-constructing any new elements.
    pub fn resize(&mut self, new_len: usize) {
        self.resize_with(new_len, T::default);
    }
}

impl<T: Clone> DynArray<T> {
    /// Create an array of `len` clones of `value`.
    pub fn from_elem(len: usize, value: &T) -> Self {
        let mut a = Self::new();
        a.resize_with_value(len, value);
        a
    }

    /// Resize to `new_len`, filling any new slots with clones of `value`.
    pub fn resize_with_value(&mut self, new_len: usize, value: &T) {
        self.resize_with(new_len, || value.clone());
    }

    /// Append clones of every element of `src`.
    pub fn extend_from_slice(&mut self, src: &[T]) {
        self.grow_for(self.len + src.len());
        for v in src {
            self.push_back(v.clone());
        }
    }

    /// Replace the contents with a copy of `src`.
    ///
    /// The overlapping prefix is assigned in place with
    /// [`Clone::clone_from`]; surplus elements are dropped and missing
    /// ones cloned in.
    pub fn assign(&mut self, src: &[T]) {
        self.truncate(src.len());
        let (prefix, rest) = src.split_at(self.len);
        for (dst, s) in self.as_mut_slice().iter_mut().zip(prefix) {
            dst.clone_from(s);
        }
        self.extend_from_slice(rest);
    }
}

#[cold]
#[track_caller]
fn index_out_of_bounds(index: usize, len: usize) -> ! {
    panic!("index {index} out of bounds for DynArray of length {len}")
}

#[cold]
#[track_caller]
fn position_out_of_bounds(pos: usize, len: usize) -> ! {
    panic!("position {pos} out of bounds for DynArray of length {len}")
}

#[cold]
#[track_caller]
fn empty_access(op: &str) -> ! {
    panic!("{op}() called on an empty DynArray")
}

#[cold]
#[track_caller]
fn fail(e: VtdError) -> ! {
    if let VtdError::AllocationFailed { bytes, align } = e {
        if let Ok(layout) = Layout::from_size_align(bytes, align) {
            handle_alloc_error(layout);
        }
    }
    panic!("DynArray: {e}")
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        self.clear();
        // RawBuf releases the allocation in its own Drop.
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for DynArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for DynArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for DynArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: Clone> Clone for DynArray<T> {
    fn clone(&self) -> Self {
        let mut a = Self::new();
        a.assign(self.as_slice());
        a
    }

    fn clone_from(&mut self, source: &Self) {
        self.assign(source.as_slice());
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T: Hash> Hash for DynArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: Clone> From<&[T]> for DynArray<T> {
    fn from(src: &[T]) -> Self {
        let mut a = Self::new();
        a.assign(src);
        a
    }
}

impl<T, const N: usize> From<[T; N]> for DynArray<T> {
    fn from(src: [T; N]) -> Self {
        let mut a = Self::with_capacity(N);
        for v in src {
            a.push_back(v);
        }
        a
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut a = Self::new();
        a.extend(iter);
        a
    }
}

impl<T> Extend<T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.push_back(v);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for v in iter {
            self.push_back(*v);
        }
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
