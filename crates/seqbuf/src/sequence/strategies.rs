use core::{
    mem::ManuallyDrop,
    ptr::{self, NonNull},
};

#[inline(always)]
pub(super) unsafe fn move_elements<T>(src: NonNull<T>, dst: NonNull<T>, len: usize) {
    unsafe {
        src.copy_to_nonoverlapping(dst, len);
    }
}

/// Moves `[from, len)` up by `by` slots. The ranges may overlap.
#[inline(always)]
pub(super) unsafe fn shift_right<T>(data: NonNull<T>, from: usize, len: usize, by: usize) {
    if from < len {
        unsafe {
            data.add(from).copy_to(data.add(from + by), len - from);
        }
    }
}

/// Moves `[from, len)` down to start at `to`. The ranges may overlap.
#[inline(always)]
pub(super) unsafe fn shift_left<T>(data: NonNull<T>, to: usize, from: usize, len: usize) {
    if from < len {
        unsafe {
            data.add(from).copy_to(data.add(to), len - from);
        }
    }
}

#[inline(always)]
pub(super) unsafe fn drop_range<T>(ptr: NonNull<T>, len: usize) {
    if core::mem::needs_drop::<T>() && len != 0 {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(ptr.as_ptr(), len));
        }
    }
}

/// Fills a hole of `gap` slots opened at `pos` in front of `tail` live
/// elements.
///
/// If filling unwinds, the values written so far are dropped and the tail
/// is moved back, leaving the length as it was before the hole was opened.
pub(super) struct GapGuard<'a, T> {
    data: NonNull<T>,
    len: &'a mut usize,
    pos: usize,
    gap: usize,
    tail: usize,
    filled: usize,
}

impl<'a, T> GapGuard<'a, T> {

    /// # Safety
    /// `[pos, pos + gap)` must be uninitialized slots of the allocation
    /// behind `data`, followed by `tail` initialized elements.
    #[inline(always)]
    pub unsafe fn new(data: NonNull<T>, len: &'a mut usize, pos: usize, gap: usize, tail: usize) -> Self {
        Self {
            data,
            len,
            pos,
            gap,
            tail,
            filled: 0,
        }
    }

    #[inline(always)]
    pub fn fill(&mut self, value: T) {
        assert!(self.filled < self.gap, "gap overfilled");
        unsafe { self.data.add(self.pos + self.filled).write(value) };
        self.filled += 1;
    }

    #[inline(always)]
    pub fn finish(self) {
        debug_assert_eq!(self.filled, self.gap);
        let mut this = ManuallyDrop::new(self);
        let len = this.pos + this.gap + this.tail;
        *this.len = len;
    }
}

impl<T> Drop for GapGuard<'_, T> {

    fn drop(&mut self) {
        unsafe {
            drop_range(self.data.add(self.pos), self.filled);
            shift_left(self.data, self.pos, self.pos + self.gap, self.pos + self.gap + self.tail);
        }
        *self.len = self.pos + self.tail;
    }
}
