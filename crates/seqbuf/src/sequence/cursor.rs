use core::{
    ops::{Deref, DerefMut},
    ptr,
};

/// Forward position over the live elements of a buffer.
///
/// A cursor borrows the buffer it was taken from, so the buffer cannot be
/// reallocated or shifted while the cursor exists. Dereferencing the end
/// position or stepping past it panics.
pub struct Cursor<'a, T> {
    items: &'a [T],
    pos: usize,
}

impl<T> Clone for Cursor<'_, T> {

    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<'a, T> Cursor<'a, T> {

    #[inline(always)]
    pub(crate) fn new(items: &'a [T], pos: usize) -> Self {
        debug_assert!(pos <= items.len());
        Self { items, pos }
    }

    #[inline(always)]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    pub fn is_end(&self) -> bool {
        self.pos == self.items.len()
    }

    /// Element under the cursor, `None` at the end position.
    #[inline(always)]
    pub fn get(&self) -> Option<&'a T> {
        self.items.get(self.pos)
    }

    /// Steps forward and returns the new position.
    #[inline(always)]
    pub fn advance(&mut self) -> Self {
        if self.is_end() {
            panic!("cursor advanced past end position {}", self.pos)
        }
        self.pos += 1;
        *self
    }

    /// Steps forward and returns the position held before the step.
    #[inline(always)]
    pub fn advance_post(&mut self) -> Self {
        let prev = *self;
        self.advance();
        prev
    }
}

impl<T> PartialEq for Cursor<'_, T> {

    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.items.as_ptr(), other.items.as_ptr()) && self.pos == other.pos
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> Deref for Cursor<'_, T> {

    type Target = T;

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        match self.items.get(self.pos) {
            Some(value) => value,
            None => panic!("dereferenced cursor at end position {}", self.pos),
        }
    }
}

impl<T> core::fmt::Debug for Cursor<'_, T> {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cursor")
            .field("pos", &self.pos)
            .field("len", &self.items.len())
            .finish()
    }
}

/// Forward position with write access, see [`Cursor`].
pub struct CursorMut<'a, T> {
    items: &'a mut [T],
    pos: usize,
}

impl<'a, T> CursorMut<'a, T> {

    #[inline(always)]
    pub(crate) fn new(items: &'a mut [T], pos: usize) -> Self {
        debug_assert!(pos <= items.len());
        Self { items, pos }
    }

    #[inline(always)]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline(always)]
    pub fn is_end(&self) -> bool {
        self.pos == self.items.len()
    }

    #[inline(always)]
    pub fn get(&self) -> Option<&T> {
        self.items.get(self.pos)
    }

    #[inline(always)]
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.items.get_mut(self.pos)
    }

    /// Steps forward.
    #[inline(always)]
    pub fn advance(&mut self) -> &mut Self {
        if self.is_end() {
            panic!("cursor advanced past end position {}", self.pos)
        }
        self.pos += 1;
        self
    }

    /// Steps forward and returns the position held before the step.
    #[inline(always)]
    pub fn advance_post(&mut self) -> usize {
        let prev = self.pos;
        self.advance();
        prev
    }

    #[inline(always)]
    pub fn as_cursor(&self) -> Cursor<'_, T> {
        Cursor::new(self.items, self.pos)
    }
}

impl<T> Deref for CursorMut<'_, T> {

    type Target = T;

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        match self.items.get(self.pos) {
            Some(value) => value,
            None => panic!("dereferenced cursor at end position {}", self.pos),
        }
    }
}

impl<T> DerefMut for CursorMut<'_, T> {

    #[inline(always)]
    fn deref_mut(&mut self) -> &mut Self::Target {
        let pos = self.pos;
        match self.items.get_mut(pos) {
            Some(value) => value,
            None => panic!("dereferenced cursor at end position {}", pos),
        }
    }
}
