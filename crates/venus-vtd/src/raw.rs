//! Owned raw storage for [`DynArray`](crate::DynArray).
//!
//! [`RawBuf`] owns one allocation of exactly `capacity` slots and nothing
//! else: it never constructs, reads, or drops elements. Callers track
//! which slots are live and pass that count in when the buffer relocates.
//!
//! Zero-sized element types never touch the allocator; the buffer still
//! records the capacity it was asked for so that observable capacity does
//! not depend on the element type.

#![allow(unsafe_code)]

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

use crate::error::VtdError;

pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    _owns: PhantomData<T>,
}

impl<T> RawBuf<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// An empty buffer. Does not allocate.
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _owns: PhantomData,
        }
    }

    pub fn capacity(&self) -> usize {
        self.cap
    }

    pub fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Move to an allocation of exactly `new_cap` slots.
    ///
    /// The first `live` slots are relocated bitwise into the new
    /// allocation and the old one is released. On error nothing changes.
    ///
    /// `live` must not exceed either capacity.
    pub fn try_reallocate(&mut self, new_cap: usize, live: usize) -> Result<(), VtdError> {
        debug_assert!(live <= self.cap && live <= new_cap);

        if new_cap == 0 {
            self.release();
            return Ok(());
        }
        if Self::IS_ZST {
            self.cap = new_cap;
            return Ok(());
        }

        let layout = Layout::array::<T>(new_cap).map_err(|_| VtdError::CapacityOverflow)?;
        // SAFETY: layout has non-zero size (new_cap > 0 and T is not zero-sized).
        let raw = unsafe { alloc::alloc(layout) } as *mut T;
        let new_ptr = NonNull::new(raw).ok_or(VtdError::AllocationFailed {
            bytes: layout.size(),
            align: layout.align(),
        })?;

        // SAFETY: both regions hold at least `live` slots, the new one was
        // just allocated so they cannot overlap, and the first `live` old
        // slots are initialised per the caller contract.
        unsafe { ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), live) };

        self.release();
        self.ptr = new_ptr;
        self.cap = new_cap;
        Ok(())
    }

    /// Free the allocation without touching any element.
    ///
    /// Live elements must already have been dropped or moved out.
    pub fn release(&mut self) {
        if self.cap != 0 && !Self::IS_ZST {
            // The layout was valid when this allocation was made with the
            // same capacity, so recomputing it cannot fail.
            if let Ok(layout) = Layout::array::<T>(self.cap) {
                // SAFETY: ptr was returned by `alloc` with exactly this layout
                // and has not been freed since.
                unsafe { alloc::dealloc(self.ptr.as_ptr() as *mut u8, layout) };
            }
        }
        self.ptr = NonNull::dangling();
        self.cap = 0;
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_empty() {
        let buf: RawBuf<u64> = RawBuf::new();
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn reallocate_relocates_live_prefix() {
        let mut buf: RawBuf<u32> = RawBuf::new();
        buf.try_reallocate(16, 0).unwrap();
        for i in 0..4 {
            // SAFETY: i < capacity.
            unsafe { buf.ptr().add(i).write(i as u32 * 10) };
        }
        let before = buf.ptr();
        buf.try_reallocate(32, 4).unwrap();
        assert_ne!(buf.ptr(), before);
        assert_eq!(buf.capacity(), 32);
        // SAFETY: first four slots were relocated.
        let got: Vec<u32> = (0..4).map(|i| unsafe { buf.ptr().add(i).read() }).collect();
        assert_eq!(got, vec![0, 10, 20, 30]);
    }

    #[test]
    fn reallocate_to_zero_releases() {
        let mut buf: RawBuf<u8> = RawBuf::new();
        buf.try_reallocate(16, 0).unwrap();
        buf.try_reallocate(0, 0).unwrap();
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn zero_sized_type_tracks_capacity_without_allocating() {
        let mut buf: RawBuf<()> = RawBuf::new();
        buf.try_reallocate(48, 0).unwrap();
        assert_eq!(buf.capacity(), 48);
        assert_eq!(buf.ptr(), NonNull::<()>::dangling().as_ptr());
    }

    #[test]
    fn oversized_layout_is_capacity_overflow() {
        let mut buf: RawBuf<u64> = RawBuf::new();
        let result = buf.try_reallocate(usize::MAX / 4, 0);
        assert_eq!(result, Err(VtdError::CapacityOverflow));
        assert_eq!(buf.capacity(), 0);
    }
}
