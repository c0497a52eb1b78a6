use core::{
    fmt::{self, Debug, Display, Formatter},
    ops::Deref,
};

/// Public operation that rejected a position.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Operation {
    Insert,
    InsertSlice,
    InsertSequence,
    Erase,
    EraseRange,
    PopBack,
    PopFront,
    At,
}

impl Display for Operation {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Insert => "insert",
            Self::InsertSlice => "insert_slice",
            Self::InsertSequence => "insert_sequence",
            Self::Erase => "erase",
            Self::EraseRange => "erase_range",
            Self::PopBack => "pop_back",
            Self::PopFront => "pop_front",
            Self::At => "at",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    OutOfRange {
        op: Operation,
        index: usize,
        len: usize,
    },
    InvalidArgument {
        begin: usize,
        end: usize,
    },
    AllocFailed {
        new_capacity: usize,
    },
    CapacityOverflow {
        requested: usize,
    },
}

impl ErrorKind {

    #[inline(always)]
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }

    #[inline(always)]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

impl Display for ErrorKind {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfRange { op, index, len } => {
                write!(f, "{} position {} is out of range for size {}", op, index, len)
            },
            Self::InvalidArgument { begin, end } => {
                write!(f, "invalid range {}..{}, begin must be less than end", begin, end)
            },
            Self::AllocFailed { new_capacity } => {
                write!(f, "allocation failed with new capacity {}", new_capacity)
            },
            Self::CapacityOverflow { requested } => {
                write!(f, "capacity {} exceeds the maximum allocation size", requested)
            },
        }
    }
}

impl core::error::Error for ErrorKind {}

/// Source location of the public call that failed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location(&'static core::panic::Location<'static>);

impl Location {

    #[track_caller]
    #[inline(always)]
    pub fn caller() -> Self {
        Self(core::panic::Location::caller())
    }

    #[inline(always)]
    pub fn file(&self) -> &'static str {
        self.0.file()
    }

    #[inline(always)]
    pub fn line(&self) -> u32 {
        self.0.line()
    }
}

impl Display for Location {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self.0, f)
    }
}

impl Debug for Location {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.0, f)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct SequenceError {
    pub kind: ErrorKind,
    pub location: Location,
}

impl SequenceError {

    #[track_caller]
    #[inline(always)]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            location: Location::caller(),
        }
    }

    #[inline(always)]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

impl PartialEq<ErrorKind> for SequenceError {

    fn eq(&self, other: &ErrorKind) -> bool {
        self.kind == *other
    }
}

impl Display for SequenceError {

    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {})", self.kind, self.location)
    }
}

impl core::error::Error for SequenceError {

    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl Deref for SequenceError {

    type Target = ErrorKind;

    fn deref(&self) -> &Self::Target {
        &self.kind
    }
}

/// Attaches the location of the calling public operation to `res`.
#[track_caller]
#[inline(always)]
pub(crate) fn track<T>(res: core::result::Result<T, ErrorKind>) -> crate::Result<T> {
    match res {
        Ok(value) => Ok(value),
        Err(kind) => Err(SequenceError::new(kind)),
    }
}
