use std::alloc::{Layout, alloc, dealloc, handle_alloc_error};

use core::{
    marker::PhantomData,
    mem::size_of,
    ptr::NonNull,
};

use crate::errors::ErrorKind::{self, AllocFailed, CapacityOverflow};

/// Uninitialized heap storage for `capacity` values of `T`.
///
/// Owns the allocation only. Initialized elements inside it are tracked and
/// dropped by the owner.
pub(crate) struct RawBuffer<T> {
    data: NonNull<T>,
    capacity: usize,
    _marker: PhantomData<T>,
}

unsafe impl<T: Send> Send for RawBuffer<T> {}
unsafe impl<T: Sync> Sync for RawBuffer<T> {}

impl<T> RawBuffer<T> {

    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            data: NonNull::dangling(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    pub fn allocate(capacity: usize) -> Result<Self, ErrorKind> {
        if capacity == 0 {
            return Ok(Self::new())
        }
        if size_of::<T>() == 0 {
            return Ok(Self {
                data: NonNull::dangling(),
                capacity,
                _marker: PhantomData,
            })
        }
        let layout = Layout::array::<T>(capacity)
            .map_err(|_| CapacityOverflow { requested: capacity })?;
        let ptr = unsafe { alloc(layout) };
        let data = NonNull::new(ptr.cast::<T>())
            .ok_or(AllocFailed { new_capacity: capacity })?;
        Ok(Self {
            data,
            capacity,
            _marker: PhantomData,
        })
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline(always)]
    pub fn as_non_null(&self) -> NonNull<T> {
        self.data
    }
}

impl<T> Drop for RawBuffer<T> {

    fn drop(&mut self) {
        if self.capacity == 0 || size_of::<T>() == 0 {
            return
        }
        let layout = match Layout::array::<T>(self.capacity) {
            Ok(l) => l,
            Err(_) => return,
        };
        unsafe { dealloc(self.data.as_ptr().cast::<u8>(), layout) }
    }
}

/// Diverges on an allocation error from an infallible entry point such as
/// [`Clone`] or [`Extend`].
#[cold]
pub(crate) fn abort_on<T>(kind: ErrorKind) -> ! {
    match kind {
        AllocFailed { new_capacity } => match Layout::array::<T>(new_capacity) {
            Ok(layout) => handle_alloc_error(layout),
            Err(_) => panic!("capacity overflow"),
        },
        other => panic!("{}", other),
    }
}
