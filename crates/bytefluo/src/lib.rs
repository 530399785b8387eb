//! Bounds-checked, byte-order-aware reading of borrowed bytes.
//!
//! This crate provides:
//!
//! - [`ByteCursor`] - A cursor over `[begin, end)` of externally owned bytes
//! - [`ByteOrder`] - Big or little endian interpretation of scalars
//! - [`Scalar`] - The 8, 16, 32 and 64-bit integers a cursor can decode
//!
//! No read or seek ever leaves the cursor's range, and a failed operation
//! leaves the cursor unchanged.

mod cursor;
mod error;
mod order;
mod scalar;

pub use cursor::ByteCursor;
pub use error::{Error, ErrorKind, Result};
pub use order::ByteOrder;
pub use scalar::Scalar;

/// Re-export zerocopy traits accepted by [`ByteCursor::from_items`].
pub use zerocopy::{Immutable, IntoBytes};
