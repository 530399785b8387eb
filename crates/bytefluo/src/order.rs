//! Byte order selection for scalar reads.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// How a multi-byte scalar is laid out in memory.
///
/// Raw byte-run reads are never affected by the byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ByteOrder {
    /// Most-significant byte has the lowest address.
    #[default]
    Big,
    /// Least-significant byte has the lowest address.
    Little,
}

impl ByteOrder {
    /// Byte order of the machine this code runs on.
    #[cfg(target_endian = "big")]
    pub const NATIVE: Self = Self::Big;
    /// Byte order of the machine this code runs on.
    #[cfg(target_endian = "little")]
    pub const NATIVE: Self = Self::Little;

    /// Convert an untyped discriminant: `0` is big, `1` is little.
    pub fn from_raw(value: u32) -> Result<Self, Error> {
        match value {
            0 => Ok(Self::Big),
            1 => Ok(Self::Little),
            other => Err(Error::InvalidByteOrder(other.to_string())),
        }
    }

    /// The discriminant accepted by [`ByteOrder::from_raw`].
    #[inline]
    pub const fn as_raw(self) -> u32 {
        match self {
            Self::Big => 0,
            Self::Little => 1,
        }
    }
}

impl fmt::Display for ByteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Big => "big",
            Self::Little => "little",
        })
    }
}

impl FromStr for ByteOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "big" | "be" | "big-endian" => Ok(Self::Big),
            "little" | "le" | "little-endian" => Ok(Self::Little),
            _ => Err(Error::InvalidByteOrder(s.to_owned())),
        }
    }
}
