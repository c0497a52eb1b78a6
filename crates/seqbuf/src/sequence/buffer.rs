use core::{
    fmt::{self, Debug, Formatter},
    mem,
    ops::{Deref, DerefMut, Index, IndexMut},
    slice,
};

use crate::{
    Result,
    errors::{ErrorKind::{self, CapacityOverflow, InvalidArgument, OutOfRange}, Operation, track},
    growth::{GrowthFactor, Settings},
    raw::{RawBuffer, abort_on},
};

use super::{
    Cursor,
    CursorMut,
    Iter,
    IterMut,
    IntoIter,
    strategies::{GapGuard, drop_range, move_elements, shift_left, shift_right},
};

/// A growable, contiguous sequence of `T`.
///
/// The buffer tracks its live length separately from its allocated
/// capacity. All growth goes through [`reserve`](Self::reserve), which
/// reallocates to exactly the requested capacity; the implicit growth of
/// the insert family sizes that request with the buffer's
/// [`GrowthFactor`].
///
/// Every fallible operation checks its arguments before touching the
/// buffer, so an `Err` leaves the contents, length and capacity unchanged.
pub struct SequenceBuffer<T> {
    buf: RawBuffer<T>,
    len: usize,
    growth: GrowthFactor,
}

impl<T> SequenceBuffer<T> {

    /// Empty buffer with the default doubling growth factor. Does not allocate.
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            buf: RawBuffer::new(),
            len: 0,
            growth: GrowthFactor::DOUBLING,
        }
    }

    #[inline(always)]
    pub fn with_growth_factor(factor: impl Into<GrowthFactor>) -> Self {
        Self {
            buf: RawBuffer::new(),
            len: 0,
            growth: factor.into(),
        }
    }

    #[track_caller]
    pub fn with_capacity(
        capacity: usize,
        factor: impl Into<GrowthFactor>,
    ) -> Result<Self>
    {
        Ok(Self {
            buf: track(RawBuffer::allocate(capacity))?,
            len: 0,
            growth: factor.into(),
        })
    }

    #[track_caller]
    pub fn with_settings(settings: Settings) -> Result<Self> {
        Self::with_capacity(settings.initial_capacity, settings.growth_factor)
    }

    /// Copies `values` into a new buffer whose capacity equals `values.len()`.
    #[track_caller]
    pub fn from_slice(
        values: &[T],
        factor: impl Into<GrowthFactor>,
    ) -> Result<Self>
        where
            T: Clone
    {
        let mut buffer = Self::with_capacity(values.len(), factor)?;
        track(buffer.insert_cloned(values, 0, Operation::InsertSlice))?;
        Ok(buffer)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    #[inline(always)]
    pub fn growth_factor(&self) -> GrowthFactor {
        self.growth
    }

    /// `len / capacity`, or `0.0` for an unallocated buffer.
    #[inline(always)]
    pub fn load_factor(&self) -> f64 {
        if self.capacity() == 0 {
            return 0.0
        }
        self.len as f64 / self.capacity() as f64
    }

    #[inline(always)]
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_non_null().as_ptr()
    }

    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_non_null().as_ptr()
    }

    #[inline(always)]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    #[inline(always)]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    fn reallocate(&mut self, new_capacity: usize) -> core::result::Result<(), ErrorKind> {
        debug_assert!(new_capacity >= self.len);
        let new_buf = RawBuffer::allocate(new_capacity)?;
        unsafe {
            move_elements(self.buf.as_non_null(), new_buf.as_non_null(), self.len);
        }
        let old_capacity = self.capacity();
        self.buf = new_buf;
        seqbuf_log::trace!(
            "reallocated {} -> {} slots holding {} elements",
            old_capacity, new_capacity, self.len,
        );
        Ok(())
    }

    /// Grows the allocation to exactly `min_capacity` slots.
    ///
    /// Does nothing if the capacity is already at least `min_capacity`.
    #[track_caller]
    pub fn reserve(&mut self, min_capacity: usize) -> Result<()> {
        if min_capacity <= self.capacity() {
            return Ok(())
        }
        track(self.reallocate(min_capacity))
    }

    /// Reallocates so that the capacity equals the length.
    #[track_caller]
    pub fn shrink_to_fit(&mut self) -> Result<()> {
        if self.len >= self.capacity() {
            return Ok(())
        }
        seqbuf_log::debug!("shrinking {} slots to {}", self.capacity(), self.len);
        if self.len == 0 {
            self.buf = RawBuffer::new();
            return Ok(())
        }
        track(self.reallocate(self.len))
    }

    #[inline(always)]
    fn grow_one(&mut self, new_capacity: usize) -> core::result::Result<(), ErrorKind> {
        if self.len < self.capacity() {
            return Ok(())
        }
        self.reallocate(new_capacity)
    }

    /// Appends `value`, growing by the growth factor when full.
    #[track_caller]
    pub fn push_back(&mut self, value: T) -> Result<&mut T> {
        track(self.grow_one(self.growth.for_append(self.capacity())))?;
        unsafe {
            let mut ptr = self.buf.as_non_null().add(self.len);
            ptr.write(value);
            self.len += 1;
            Ok(ptr.as_mut())
        }
    }

    /// Inserts `value` at the front, moving every element up one slot.
    #[track_caller]
    pub fn push_front(&mut self, value: T) -> Result<&mut T> {
        track(self.grow_one(self.growth.for_append(self.capacity())))?;
        unsafe {
            let data = self.buf.as_non_null();
            shift_right(data, 0, self.len, 1);
            let mut ptr = data;
            ptr.write(value);
            self.len += 1;
            Ok(ptr.as_mut())
        }
    }

    /// Inserts `value` before position `pos`. `pos == len()` appends.
    ///
    /// # Errors
    /// [`ErrorKind::OutOfRange`] if `pos > len()`.
    #[track_caller]
    pub fn insert(&mut self, value: T, pos: usize) -> Result<&mut T> {
        if pos > self.len {
            return track(Err(OutOfRange { op: Operation::Insert, index: pos, len: self.len }))
        }
        track(self.grow_one(self.growth.for_insert(self.capacity())))?;
        unsafe {
            let data = self.buf.as_non_null();
            shift_right(data, pos, self.len, 1);
            let mut ptr = data.add(pos);
            ptr.write(value);
            self.len += 1;
            Ok(ptr.as_mut())
        }
    }

    fn insert_cloned(
        &mut self,
        values: &[T],
        pos: usize,
        op: Operation,
    ) -> core::result::Result<(), ErrorKind>
        where
            T: Clone
    {
        if pos > self.len {
            return Err(OutOfRange { op, index: pos, len: self.len })
        }
        if values.is_empty() {
            return Ok(())
        }
        let required = self.len
            .checked_add(values.len())
            .ok_or(CapacityOverflow { requested: usize::MAX })?;
        if required > self.capacity() {
            self.reallocate(self.growth.for_bulk(required))?;
        }
        let data = self.buf.as_non_null();
        let tail = self.len - pos;
        unsafe {
            shift_right(data, pos, self.len, values.len());
        }
        let mut gap = unsafe { GapGuard::new(data, &mut self.len, pos, values.len(), tail) };
        for value in values {
            gap.fill(value.clone());
        }
        gap.finish();
        Ok(())
    }

    /// Inserts clones of `values` before position `pos`, keeping their order.
    ///
    /// # Errors
    /// [`ErrorKind::OutOfRange`] if `pos > len()`, checked even when
    /// `values` is empty.
    #[track_caller]
    pub fn insert_slice(&mut self, values: &[T], pos: usize) -> Result<()>
        where
            T: Clone
    {
        track(self.insert_cloned(values, pos, Operation::InsertSlice))
    }

    /// Inserts clones of the live elements of `other` before position `pos`.
    #[track_caller]
    pub fn insert_sequence(&mut self, other: &SequenceBuffer<T>, pos: usize) -> Result<()>
        where
            T: Clone
    {
        track(self.insert_cloned(other.as_slice(), pos, Operation::InsertSequence))
    }

    /// # Errors
    /// [`ErrorKind::OutOfRange`] if the buffer is empty.
    #[track_caller]
    pub fn pop_back(&mut self) -> Result<T> {
        if self.len == 0 {
            return track(Err(OutOfRange { op: Operation::PopBack, index: 0, len: 0 }))
        }
        self.len -= 1;
        Ok(unsafe { self.buf.as_non_null().add(self.len).read() })
    }

    /// # Errors
    /// [`ErrorKind::OutOfRange`] if the buffer is empty.
    #[track_caller]
    pub fn pop_front(&mut self) -> Result<T> {
        if self.len == 0 {
            return track(Err(OutOfRange { op: Operation::PopFront, index: 0, len: 0 }))
        }
        let data = self.buf.as_non_null();
        let value = unsafe { data.read() };
        unsafe {
            shift_left(data, 0, 1, self.len);
        }
        self.len -= 1;
        Ok(value)
    }

    unsafe fn remove_unchecked(&mut self, pos: usize, count: usize) {
        debug_assert!(pos + count <= self.len);
        let data = self.buf.as_non_null();
        let old_len = self.len;
        // the tail leaks if a destructor unwinds
        self.len = pos;
        unsafe {
            drop_range(data.add(pos), count);
            shift_left(data, pos, pos + count, old_len);
        }
        self.len = old_len - count;
    }

    /// Removes up to `count` elements starting at `pos` and returns how many
    /// were removed. The count is clamped to the end of the buffer.
    ///
    /// # Errors
    /// [`ErrorKind::OutOfRange`] if `pos >= len()`.
    #[track_caller]
    pub fn erase(&mut self, pos: usize, count: usize) -> Result<usize> {
        if pos >= self.len {
            return track(Err(OutOfRange { op: Operation::Erase, index: pos, len: self.len }))
        }
        let count = count.min(self.len - pos);
        if count != 0 {
            unsafe { self.remove_unchecked(pos, count) }
        }
        Ok(count)
    }

    /// Removes the elements in `[begin, end)`.
    ///
    /// # Errors
    /// [`ErrorKind::InvalidArgument`] if `begin >= end`, otherwise
    /// [`ErrorKind::OutOfRange`] if `begin >= len()` or `end > len()`.
    #[track_caller]
    pub fn erase_range(&mut self, begin: usize, end: usize) -> Result<()> {
        if begin >= end {
            return track(Err(InvalidArgument { begin, end }))
        }
        if begin >= self.len {
            return track(Err(OutOfRange { op: Operation::EraseRange, index: begin, len: self.len }))
        }
        if end > self.len {
            return track(Err(OutOfRange { op: Operation::EraseRange, index: end, len: self.len }))
        }
        unsafe { self.remove_unchecked(begin, end - begin) }
        Ok(())
    }

    /// Drops every element past `len`. Keeps the allocation.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return
        }
        let old_len = self.len;
        self.len = len;
        unsafe {
            drop_range(self.buf.as_non_null().add(len), old_len - len);
        }
    }

    #[inline(always)]
    pub fn clear(&mut self) {
        self.truncate(0)
    }

    /// Bounds checked access.
    ///
    /// # Errors
    /// [`ErrorKind::OutOfRange`] if `index >= len()`.
    #[track_caller]
    pub fn at(&self, index: usize) -> Result<&T> {
        match self.as_slice().get(index) {
            Some(value) => Ok(value),
            None => track(Err(OutOfRange { op: Operation::At, index, len: self.len })),
        }
    }

    #[track_caller]
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;
        match self.as_mut_slice().get_mut(index) {
            Some(value) => Ok(value),
            None => track(Err(OutOfRange { op: Operation::At, index, len })),
        }
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    #[inline(always)]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// # Safety
    /// `index` must be less than [`len`](Self::len).
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        unsafe { self.buf.as_non_null().add(index).as_ref() }
    }

    /// # Safety
    /// `index` must be less than [`len`](Self::len).
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        unsafe { self.buf.as_non_null().add(index).as_mut() }
    }

    #[inline(always)]
    pub fn first(&self) -> Option<&T> {
        self.get(0)
    }

    #[inline(always)]
    pub fn last(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Index of the first element equal to `value`.
    pub fn find(&self, value: &T) -> Option<usize>
        where
            T: PartialEq
    {
        self.as_slice()
            .iter()
            .position(|elem| elem == value)
    }

    #[inline(always)]
    pub fn contains(&self, value: &T) -> bool
        where
            T: PartialEq
    {
        self.find(value).is_some()
    }

    #[inline(always)]
    pub fn iter(&self) -> Iter<'_, T> {
        unsafe { Iter::new(self.buf.as_non_null(), self.len) }
    }

    #[inline(always)]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        unsafe { IterMut::new(self.buf.as_non_null(), self.len) }
    }

    /// Cursor at the first element.
    #[inline(always)]
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), 0)
    }

    /// Cursor one past the last element.
    #[inline(always)]
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(self.as_slice(), self.len)
    }

    #[inline(always)]
    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self.as_mut_slice(), 0)
    }

    /// Moves the contents out, leaving `self` empty and unallocated with the
    /// same growth factor.
    #[inline(always)]
    pub fn take(&mut self) -> Self {
        let growth = self.growth;
        mem::replace(self, Self::with_growth_factor(growth))
    }

    /// Deep copy sized to the live elements. Fails instead of aborting when
    /// the allocation fails.
    #[track_caller]
    pub fn try_clone(&self) -> Result<Self>
        where
            T: Clone
    {
        Self::from_slice(self.as_slice(), self.growth)
    }

    /// Replaces the contents with a copy of `source`. The old allocation is
    /// released only after the copy is complete.
    #[track_caller]
    pub fn try_clone_from(&mut self, source: &Self) -> Result<()>
        where
            T: Clone
    {
        *self = source.try_clone()?;
        Ok(())
    }
}

impl<T> Drop for SequenceBuffer<T> {

    fn drop(&mut self) {
        unsafe {
            drop_range(self.buf.as_non_null(), self.len);
        }
    }
}

impl<T> Default for SequenceBuffer<T> {

    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for SequenceBuffer<T> {

    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(buffer) => buffer,
            Err(err) => abort_on::<T>(err.kind),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(err) = self.try_clone_from(source) {
            abort_on::<T>(err.kind)
        }
    }
}

impl<T: Debug> Debug for SequenceBuffer<T> {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for SequenceBuffer<T> {

    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for SequenceBuffer<T> {}

impl<T: PartialEq> PartialEq<[T]> for SequenceBuffer<T> {

    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for SequenceBuffer<T> {

    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T> Index<usize> for SequenceBuffer<T> {

    type Output = T;

    #[inline(always)]
    fn index(&self, index: usize) -> &Self::Output {
        if index >= self.len {
            panic!("index {} out of bounds for length {}", index, self.len)
        }
        unsafe { self.get_unchecked(index) }
    }
}

impl<T> IndexMut<usize> for SequenceBuffer<T> {

    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        if index >= self.len {
            panic!("index {} out of bounds for length {}", index, self.len)
        }
        unsafe { self.get_unchecked_mut(index) }
    }
}

impl<T> AsRef<[T]> for SequenceBuffer<T> {

    #[inline(always)]
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for SequenceBuffer<T> {

    #[inline(always)]
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Deref for SequenceBuffer<T> {

    type Target = [T];

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for SequenceBuffer<T> {

    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<T> Extend<T> for SequenceBuffer<T> {

    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            if let Err(err) = self.push_back(value) {
                abort_on::<T>(err.kind)
            }
        }
    }
}

impl<T> FromIterator<T> for SequenceBuffer<T> {

    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut buffer = Self::new();
        buffer.extend(iter);
        buffer
    }
}

impl<T> From<Vec<T>> for SequenceBuffer<T> {

    fn from(value: Vec<T>) -> Self {
        let mut buffer = Self::new();
        if let Err(err) = buffer.reserve(value.len()) {
            abort_on::<T>(err.kind)
        }
        buffer.extend(value);
        buffer
    }
}

impl<T, const N: usize> From<[T; N]> for SequenceBuffer<T> {

    fn from(value: [T; N]) -> Self {
        let mut buffer = Self::new();
        if let Err(err) = buffer.reserve(N) {
            abort_on::<T>(err.kind)
        }
        buffer.extend(value);
        buffer
    }
}

impl<T: Clone> From<&[T]> for SequenceBuffer<T> {

    fn from(value: &[T]) -> Self {
        match Self::from_slice(value, GrowthFactor::default()) {
            Ok(buffer) => buffer,
            Err(err) => abort_on::<T>(err.kind),
        }
    }
}

impl<'a, T> IntoIterator for &'a SequenceBuffer<T> {

    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SequenceBuffer<T> {

    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for SequenceBuffer<T> {

    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let buf = mem::replace(&mut self.buf, RawBuffer::new());
        let len = mem::take(&mut self.len);
        unsafe { IntoIter::new(buf, len) }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    use std::{cell::Cell, rc::Rc};

    struct Tracked(Rc<Cell<usize>>);

    impl Drop for Tracked {

        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn tracked(count: usize, drops: &Rc<Cell<usize>>) -> SequenceBuffer<Tracked> {
        (0..count).map(|_| Tracked(drops.clone())).collect()
    }

    #[test]
    fn new_buffer_is_unallocated() {
        let buf = SequenceBuffer::<i32>::new();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 0);
        assert_eq!(buf.load_factor(), 0.0);
        assert!(buf.is_empty());
    }

    #[test]
    fn from_slice_sizes_capacity_to_len() {
        let buf = SequenceBuffer::from_slice(&[1, 2, 3, 4], 2.0).unwrap();
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf, [1, 2, 3, 4]);
        assert_eq!(buf.load_factor(), 1.0);
    }

    #[test]
    fn fractional_factor_growth_keeps_the_product() {
        let mut buf = SequenceBuffer::from_slice(&[0u8; 10], 1.9).unwrap();
        buf.insert(0, 1).unwrap();
        assert_eq!(buf.capacity(), 19);
        let mut buf = SequenceBuffer::from_slice(&[0u8; 10], 1.9).unwrap();
        buf.push_back(1).unwrap();
        assert_eq!(buf.capacity(), 19);
    }

    #[test]
    fn push_back_grows_geometrically() {
        let mut buf = SequenceBuffer::with_growth_factor(2.0);
        let mut capacities = Vec::new();
        for i in 0..9 {
            buf.push_back(i).unwrap();
            capacities.push(buf.capacity());
        }
        assert_eq!(capacities, [2, 2, 4, 4, 8, 8, 8, 8, 16]);
        assert_eq!(buf, [0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn push_front_shifts_existing_elements() {
        let mut buf = SequenceBuffer::with_growth_factor(3.0);
        for i in 0..5 {
            *buf.push_front(i).unwrap() += 10;
        }
        assert_eq!(buf, [14, 13, 12, 11, 10]);
        assert_eq!(buf.capacity(), 9);
    }

    #[test]
    fn insert_in_the_middle() {
        let mut buf = SequenceBuffer::from([1, 2, 4]);
        buf.insert(3, 2).unwrap();
        buf.insert(0, 0).unwrap();
        buf.insert(5, 5).unwrap();
        assert_eq!(buf, [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn insert_past_end_is_rejected_without_change() {
        let mut buf = SequenceBuffer::from([1, 2]);
        let capacity = buf.capacity();
        let err = buf.insert(9, 3).unwrap_err();
        assert_eq!(err, ErrorKind::OutOfRange { op: Operation::Insert, index: 3, len: 2 });
        assert_eq!(buf, [1, 2]);
        assert_eq!(buf.capacity(), capacity);
    }

    #[test]
    fn insert_slice_at_every_position() {
        for pos in 0..=3 {
            let mut buf = SequenceBuffer::from([0, 1, 2]);
            buf.insert_slice(&[7, 8], pos).unwrap();
            let mut expected = vec![0, 1, 2];
            expected.splice(pos..pos, [7, 8]);
            assert_eq!(buf.as_slice(), expected.as_slice());
        }
    }

    #[test]
    fn insert_slice_growth_scales_the_requirement() {
        let mut buf = SequenceBuffer::from_slice(&[1, 2, 3], 2.0).unwrap();
        buf.insert_slice(&[4, 5], 3).unwrap();
        assert_eq!(buf.capacity(), 10);
        buf.insert_slice(&[], 9).unwrap_err();
        buf.insert_slice(&[], 5).unwrap();
        assert_eq!(buf.len(), 5);
    }

    #[test]
    fn insert_sequence_copies_live_elements() {
        let mut buf = SequenceBuffer::from([1, 5]);
        let mut other = SequenceBuffer::with_capacity(16, 2.0).unwrap();
        other.extend([2, 3, 4]);
        buf.insert_sequence(&other, 1).unwrap();
        assert_eq!(buf, [1, 2, 3, 4, 5]);
        assert_eq!(other, [2, 3, 4]);
        buf.insert_sequence(&SequenceBuffer::new(), 5).unwrap();
        assert_eq!(buf.len(), 5);
    }

    #[test]
    fn pops_return_elements_and_reject_empty() {
        let mut buf = SequenceBuffer::from([1, 2, 3]);
        assert_eq!(buf.pop_front().unwrap(), 1);
        assert_eq!(buf.pop_back().unwrap(), 3);
        assert_eq!(buf.pop_back().unwrap(), 2);
        assert_eq!(buf.capacity(), 3);
        assert!(buf.pop_back().unwrap_err().is_out_of_range());
        assert!(buf.pop_front().unwrap_err().is_out_of_range());
    }

    #[test]
    fn erase_clamps_count() {
        let mut buf = SequenceBuffer::from([0, 1, 2, 3, 4]);
        assert_eq!(buf.erase(1, 2).unwrap(), 2);
        assert_eq!(buf, [0, 3, 4]);
        assert_eq!(buf.erase(1, 100).unwrap(), 2);
        assert_eq!(buf, [0]);
        assert_eq!(buf.erase(0, 0).unwrap(), 0);
        assert_eq!(buf, [0]);
        assert!(buf.erase(1, 1).unwrap_err().is_out_of_range());
    }

    #[test]
    fn erase_range_validates_in_order() {
        let mut buf = SequenceBuffer::from([0, 1, 2]);
        assert!(buf.erase_range(2, 2).unwrap_err().is_invalid_argument());
        assert!(buf.erase_range(7, 3).unwrap_err().is_invalid_argument());
        assert_eq!(
            buf.erase_range(3, 5).unwrap_err(),
            ErrorKind::OutOfRange { op: Operation::EraseRange, index: 3, len: 3 },
        );
        assert_eq!(
            buf.erase_range(1, 4).unwrap_err(),
            ErrorKind::OutOfRange { op: Operation::EraseRange, index: 4, len: 3 },
        );
        buf.erase_range(0, 2).unwrap();
        assert_eq!(buf, [2]);
    }

    #[test]
    fn reserve_and_shrink() {
        let mut buf = SequenceBuffer::from([1, 2]);
        buf.reserve(10).unwrap();
        assert_eq!(buf.capacity(), 10);
        buf.reserve(4).unwrap();
        assert_eq!(buf.capacity(), 10);
        buf.shrink_to_fit().unwrap();
        assert_eq!(buf.capacity(), 2);
        buf.clear();
        buf.shrink_to_fit().unwrap();
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn failed_reserve_keeps_contents() {
        let mut buf = SequenceBuffer::from([1u64, 2]);
        let err = buf.reserve(usize::MAX).unwrap_err();
        assert_eq!(err, ErrorKind::CapacityOverflow { requested: usize::MAX });
        assert_eq!(buf, [1, 2]);
        assert_eq!(buf.capacity(), 2);
    }

    #[test]
    fn checked_and_unchecked_access() {
        let mut buf = SequenceBuffer::from([5, 6, 7]);
        assert_eq!(*buf.at(2).unwrap(), 7);
        assert!(buf.at(3).is_err());
        *buf.at_mut(0).unwrap() = 50;
        buf[1] = 60;
        assert_eq!(unsafe { *buf.get_unchecked(0) }, 50);
        assert_eq!(buf.get(1), Some(&60));
        assert_eq!(buf.first(), Some(&50));
        assert_eq!(buf.last(), Some(&7));
        assert_eq!(SequenceBuffer::<u8>::new().last(), None);
    }

    #[test]
    #[should_panic(expected = "index 3 out of bounds for length 3")]
    fn index_past_len_panics() {
        let buf = SequenceBuffer::from([1, 2, 3]);
        let _value = buf[3];
    }

    #[test]
    fn find_returns_first_match() {
        let buf = SequenceBuffer::from([4, 2, 4, 9]);
        assert_eq!(buf.find(&4), Some(0));
        assert_eq!(buf.find(&9), Some(3));
        assert_eq!(buf.find(&1), None);
        assert!(buf.contains(&2));
    }

    #[test]
    fn clone_drops_spare_capacity() {
        let mut buf = SequenceBuffer::with_capacity(32, 1.5).unwrap();
        buf.extend([1, 2, 3]);
        let copy = buf.clone();
        assert_eq!(copy, buf);
        assert_eq!(copy.capacity(), 3);
        assert_eq!(copy.growth_factor(), GrowthFactor::new(1.5));
    }

    #[test]
    fn clone_from_replaces_contents() {
        let mut target = SequenceBuffer::from(vec![String::from("old")]);
        let source = SequenceBuffer::from(vec![String::from("a"), String::from("b")]);
        target.clone_from(&source);
        assert_eq!(target, source);
        assert_eq!(target.capacity(), 2);
    }

    #[test]
    fn take_leaves_source_empty() {
        let mut buf = SequenceBuffer::from_slice(&[1, 2, 3], 4.0).unwrap();
        let moved = buf.take();
        assert_eq!(moved, [1, 2, 3]);
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 0);
        assert_eq!(buf.growth_factor().get(), 4.0);
        buf.push_back(1).unwrap();
        assert_eq!(buf.capacity(), 4);
    }

    #[test]
    fn every_element_is_dropped_once() {
        let drops = Rc::new(Cell::new(0));
        let mut buf = tracked(10, &drops);
        buf.erase(2, 3).unwrap();
        assert_eq!(drops.get(), 3);
        drop(buf.pop_front().unwrap());
        drop(buf.pop_back().unwrap());
        assert_eq!(drops.get(), 5);
        buf.erase_range(0, 2).unwrap();
        assert_eq!(drops.get(), 7);
        buf.reserve(100).unwrap();
        buf.shrink_to_fit().unwrap();
        assert_eq!(drops.get(), 7);
        drop(buf);
        assert_eq!(drops.get(), 10);
    }

    #[test]
    fn owned_iteration_drops_the_rest() {
        let drops = Rc::new(Cell::new(0));
        let mut iter = tracked(6, &drops).into_iter();
        drop(iter.next());
        drop(iter.next_back());
        assert_eq!(drops.get(), 2);
        drop(iter);
        assert_eq!(drops.get(), 6);
    }

    #[test]
    fn panicking_clone_restores_the_tail() {
        #[derive(Debug, PartialEq)]
        struct Fragile(u32);

        impl Clone for Fragile {

            fn clone(&self) -> Self {
                if self.0 == 13 {
                    panic!("unlucky")
                }
                Fragile(self.0)
            }
        }

        let mut buf = SequenceBuffer::from([Fragile(1), Fragile(2), Fragile(3)]);
        let values = [Fragile(10), Fragile(13)];
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            buf.insert_slice(&values, 1)
        }));
        assert!(result.is_err());
        assert_eq!(buf, [Fragile(1), Fragile(2), Fragile(3)]);
    }

    #[test]
    fn zero_sized_elements() {
        let mut buf = SequenceBuffer::new();
        for _ in 0..100 {
            buf.push_back(()).unwrap();
        }
        buf.insert((), 50).unwrap();
        buf.erase(0, 10).unwrap();
        assert_eq!(buf.len(), 91);
        assert_eq!(buf.iter().count(), 91);
        assert_eq!(buf.find(&()), Some(0));
    }
}
