//! Error types for bytefluo.

use std::io;

use thiserror::Error;

/// Errors raised by [`ByteCursor`](crate::ByteCursor) and [`ByteOrder`](crate::ByteOrder).
///
/// A failed operation never changes the cursor, so the caller may retry
/// with corrected arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The range start was absent while the end was given.
    #[error("null begin with non-null end (end = {end})")]
    NullBeginNonNullEnd { end: usize },

    /// The range end was absent while the start was given.
    #[error("null end with non-null begin (begin = {begin})")]
    NullEndNonNullBegin { begin: usize },

    /// The range end lies before its start.
    #[error("end precedes begin (begin = {begin}, end = {end})")]
    EndPrecedesBegin { begin: usize, end: usize },

    /// The range end lies outside the borrowed region.
    #[error("range end {end} lies outside a region of {len} bytes")]
    RangeOutOfBounds { end: usize, len: usize },

    /// A byte order value other than big or little.
    #[error("invalid byte order: {0}")]
    InvalidByteOrder(String),

    /// A read needed more bytes than remain before the end.
    #[error("attempt to read past end of data: needed {needed} bytes but only {available} available")]
    AttemptToReadPastEnd { needed: usize, available: usize },

    /// A seek target lies after the end.
    #[error("attempt to seek after end of data (size {size})")]
    AttemptToSeekAfterEnd { size: usize },

    /// A seek target lies before the beginning.
    #[error("attempt to seek before beginning of data")]
    AttemptToSeekBeforeBeginning,
}

/// The category of an [`Error`], without its context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NullBeginNonNullEnd,
    NullEndNonNullBegin,
    EndPrecedesBegin,
    RangeOutOfBounds,
    InvalidByteOrder,
    AttemptToReadPastEnd,
    AttemptToSeekAfterEnd,
    AttemptToSeekBeforeBeginning,
}

impl Error {
    /// Get the category of this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NullBeginNonNullEnd { .. } => ErrorKind::NullBeginNonNullEnd,
            Self::NullEndNonNullBegin { .. } => ErrorKind::NullEndNonNullBegin,
            Self::EndPrecedesBegin { .. } => ErrorKind::EndPrecedesBegin,
            Self::RangeOutOfBounds { .. } => ErrorKind::RangeOutOfBounds,
            Self::InvalidByteOrder(_) => ErrorKind::InvalidByteOrder,
            Self::AttemptToReadPastEnd { .. } => ErrorKind::AttemptToReadPastEnd,
            Self::AttemptToSeekAfterEnd { .. } => ErrorKind::AttemptToSeekAfterEnd,
            Self::AttemptToSeekBeforeBeginning => ErrorKind::AttemptToSeekBeforeBeginning,
        }
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        let kind = match err.kind() {
            ErrorKind::AttemptToReadPastEnd => io::ErrorKind::UnexpectedEof,
            _ => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, err)
    }
}

/// Result type alias using the bytefluo Error type.
pub type Result<T> = std::result::Result<T, Error>;
