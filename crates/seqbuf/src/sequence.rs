mod buffer;
mod cursor;
mod iter;
mod strategies;

pub use buffer::SequenceBuffer;
pub use cursor::{Cursor, CursorMut};
pub use iter::{Iter, IterMut, IntoIter};
