#[macro_use]

mod macros;
mod raw;
pub mod errors;
pub mod growth;
pub mod sequence;

pub use errors::{SequenceError, ErrorKind, Operation, Location};
pub use growth::{GrowthFactor, Settings};
pub use sequence::{SequenceBuffer, Cursor, CursorMut, Iter, IterMut, IntoIter};

pub type Result<T> = core::result::Result<T, SequenceError>;
