//! RFC 4122 UUID records read through a [`bytefluo::ByteCursor`].
//!
//! The record is decoded one field at a time, so the result is independent
//! of the host's byte order and of any structure padding the compiler might
//! choose for [`Uuid`].
//!
//! ```
//! use bytefluo::ByteOrder;
//! use bytefluo_uuid::Uuid;
//!
//! let bytes = [
//!     0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
//!     0x88, 0x99, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF,
//! ];
//! let uuid = Uuid::from_bytes(&bytes, ByteOrder::Little).unwrap();
//! assert_eq!(uuid.time_low, 0x33221100);
//! assert_eq!(uuid.to_string(), "33221100-5544-7766-8899-aabbccddeeff");
//! ```

mod error;
mod record;

pub use error::{Error, Result};
pub use record::{Uuid, Variant};
