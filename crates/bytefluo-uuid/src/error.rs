//! Error types for UUID decoding.

use thiserror::Error;

/// Errors that can occur when decoding or parsing a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Cursor error while reading the record.
    #[error("{0}")]
    Cursor(#[from] bytefluo::Error),

    /// Invalid textual UUID.
    #[error("invalid UUID format: {0}")]
    InvalidUuid(String),
}

/// Result type for UUID operations.
pub type Result<T> = std::result::Result<T, Error>;
