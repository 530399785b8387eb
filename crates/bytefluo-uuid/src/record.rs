//! The RFC 4122 UUID record.
//!
//! A UUID occupies 16 bytes: three integer fields, two single-byte clock
//! sequence fields and a six-byte node identifier. Integer fields are read
//! in whatever byte order the cursor is set to; the node is copied verbatim.

use std::fmt;
use std::str::FromStr;

use bytefluo::{ByteCursor, ByteOrder};

use crate::{Error, Result};

/// A UUID decoded field by field.
///
/// Format: `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`
///
/// # Field Layout
///
/// - bytes 0-3: `time_low`
/// - bytes 4-5: `time_mid`
/// - bytes 6-7: `time_hi_and_version`
/// - byte 8: `clock_seq_hi_and_reserved`
/// - byte 9: `clock_seq_low`
/// - bytes 10-15: `node`
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Uuid {
    pub time_low: u32,
    pub time_mid: u16,
    pub time_hi_and_version: u16,
    pub clock_seq_hi_and_reserved: u8,
    pub clock_seq_low: u8,
    pub node: [u8; 6],
}

/// The layout family a UUID belongs to, from the top bits of
/// `clock_seq_hi_and_reserved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// `0xx`: reserved, NCS backward compatibility.
    Ncs,
    /// `10x`: the layout described by RFC 4122.
    Rfc4122,
    /// `110`: reserved, Microsoft backward compatibility.
    Microsoft,
    /// `111`: reserved for future definition.
    Future,
}

impl Uuid {
    /// Encoded size in bytes.
    pub const SIZE: usize = 16;

    /// The nil UUID (all zeros).
    pub const NIL: Self = Self {
        time_low: 0,
        time_mid: 0,
        time_hi_and_version: 0,
        clock_seq_hi_and_reserved: 0,
        clock_seq_low: 0,
        node: [0; 6],
    };

    /// Read a UUID at the cursor position using the cursor's byte order.
    ///
    /// Either all 16 bytes are consumed or, on error, the cursor is left
    /// where it was.
    pub fn read(cursor: &mut ByteCursor<'_>) -> Result<Self> {
        let mut scratch = cursor.clone();
        let uuid = Self {
            time_low: scratch.read()?,
            time_mid: scratch.read()?,
            time_hi_and_version: scratch.read()?,
            clock_seq_hi_and_reserved: scratch.read()?,
            clock_seq_low: scratch.read()?,
            node: scratch.read_array()?,
        };
        *cursor = scratch;
        Ok(uuid)
    }

    /// Decode the first 16 bytes of `bytes` in the given byte order.
    pub fn from_bytes(bytes: &[u8], order: ByteOrder) -> Result<Self> {
        Self::read(&mut ByteCursor::new(bytes, order))
    }

    /// Check if the UUID is nil (all zeros).
    #[inline]
    pub fn is_nil(&self) -> bool {
        *self == Self::NIL
    }

    /// Version number held in the top four bits of `time_hi_and_version`.
    #[inline]
    pub const fn version(&self) -> u8 {
        (self.time_hi_and_version >> 12) as u8
    }

    /// Get the variant from the top bits of `clock_seq_hi_and_reserved`.
    pub const fn variant(&self) -> Variant {
        let bits = self.clock_seq_hi_and_reserved;
        if bits & 0x80 == 0 {
            Variant::Ncs
        } else if bits & 0x40 == 0 {
            Variant::Rfc4122
        } else if bits & 0x20 == 0 {
            Variant::Microsoft
        } else {
            Variant::Future
        }
    }
}

impl fmt::Debug for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uuid({})", self)
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = &self.node;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            self.time_low,
            self.time_mid,
            self.time_hi_and_version,
            self.clock_seq_hi_and_reserved,
            self.clock_seq_low,
            n[0], n[1], n[2], n[3], n[4], n[5]
        )
    }
}

impl FromStr for Uuid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != 36 {
            return Err(Error::InvalidUuid(format!(
                "expected 36 characters, got {}",
                s.len()
            )));
        }

        for (i, b) in s.bytes().enumerate() {
            let valid = match i {
                8 | 13 | 18 | 23 => b == b'-',
                _ => b.is_ascii_hexdigit(),
            };
            if !valid {
                return Err(Error::InvalidUuid(format!(
                    "unexpected character at position {}",
                    i
                )));
            }
        }

        // Every byte is ASCII past this point, so slicing is on char boundaries.
        let hex = |start: usize, len: usize| {
            u32::from_str_radix(&s[start..start + len], 16)
                .map_err(|_| Error::InvalidUuid(format!("invalid hex at position {}", start)))
        };

        let mut node = [0u8; 6];
        for (i, byte) in node.iter_mut().enumerate() {
            *byte = hex(24 + i * 2, 2)? as u8;
        }

        Ok(Self {
            time_low: hex(0, 8)?,
            time_mid: hex(9, 4)? as u16,
            time_hi_and_version: hex(14, 4)? as u16,
            clock_seq_hi_and_reserved: hex(19, 2)? as u8,
            clock_seq_low: hex(21, 2)? as u8,
            node,
        })
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uuid {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uuid {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use bytefluo::ErrorKind;
    use rstest::rstest;

    use super::*;

    const BYTES: [u8; 16] = [
        0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE,
        0xFF,
    ];

    #[test]
    fn test_read_big_endian() {
        let uuid = Uuid::from_bytes(&BYTES, ByteOrder::Big).unwrap();

        assert_eq!(uuid.time_low, 0x00112233);
        assert_eq!(uuid.time_mid, 0x4455);
        assert_eq!(uuid.time_hi_and_version, 0x6677);
        assert_eq!(uuid.clock_seq_hi_and_reserved, 0x88);
        assert_eq!(uuid.clock_seq_low, 0x99);
        assert_eq!(uuid.node, [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
        assert_eq!(uuid.to_string(), "00112233-4455-6677-8899-aabbccddeeff");
    }

    #[test]
    fn test_read_little_endian() {
        let uuid = Uuid::from_bytes(&BYTES, ByteOrder::Little).unwrap();

        assert_eq!(uuid.time_low, 0x33221100);
        assert_eq!(uuid.time_mid, 0x5544);
        assert_eq!(uuid.time_hi_and_version, 0x7766);
        assert_eq!(uuid.clock_seq_hi_and_reserved, 0x88);
        assert_eq!(uuid.clock_seq_low, 0x99);
        assert_eq!(uuid.node, [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]);
    }

    #[test]
    fn test_consecutive_records_share_cursor() {
        let mut data = BYTES.to_vec();
        data.extend_from_slice(&[0u8; 16]);
        let mut cursor = ByteCursor::new(&data, ByteOrder::Big);

        assert!(!Uuid::read(&mut cursor).unwrap().is_nil());
        assert_eq!(cursor.tell(), 16);
        assert!(Uuid::read(&mut cursor).unwrap().is_nil());
        assert!(cursor.eos());
    }

    #[test]
    fn test_short_input_leaves_cursor_unchanged() {
        let mut cursor = ByteCursor::new(&BYTES[..15], ByteOrder::Big);
        cursor.seek_begin(1).unwrap();

        let err = Uuid::read(&mut cursor).unwrap_err();
        match err {
            Error::Cursor(inner) => assert_eq!(inner.kind(), ErrorKind::AttemptToReadPastEnd),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(cursor.tell(), 1);
    }

    #[test]
    fn test_version_and_variant() {
        let dns: Uuid = "6ba7b810-9dad-11d1-80b4-00c04fd430c8".parse().unwrap();
        assert_eq!(dns.version(), 1);
        assert_eq!(dns.variant(), Variant::Rfc4122);

        assert_eq!(Uuid::NIL.variant(), Variant::Ncs);
        assert_eq!(Uuid::NIL.version(), 0);
    }

    #[rstest]
    #[case(0x00, Variant::Ncs)]
    #[case(0x7F, Variant::Ncs)]
    #[case(0x80, Variant::Rfc4122)]
    #[case(0xBF, Variant::Rfc4122)]
    #[case(0xC0, Variant::Microsoft)]
    #[case(0xDF, Variant::Microsoft)]
    #[case(0xE0, Variant::Future)]
    fn test_variant_bits(#[case] bits: u8, #[case] expected: Variant) {
        let uuid = Uuid {
            clock_seq_hi_and_reserved: bits,
            ..Uuid::NIL
        };
        assert_eq!(uuid.variant(), expected);
    }

    #[test]
    fn test_decoded_bytes_match_canonical_text() {
        let bytes = [
            0x6b, 0xa7, 0xb8, 0x10, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4,
            0x30, 0xc8,
        ];
        let decoded = Uuid::from_bytes(&bytes, ByteOrder::Big).unwrap();
        let parsed: Uuid = "6ba7b810-9dad-11d1-80b4-00c04fd430c8".parse().unwrap();
        assert_eq!(decoded, parsed);
    }

    #[test]
    fn test_parse_display_roundtrip() {
        let original = "12345678-abcd-ef01-2345-6789abcdef01";
        let uuid: Uuid = original.parse().unwrap();
        assert_eq!(uuid.to_string(), original);
        assert_eq!(
            "12345678-ABCD-EF01-2345-6789ABCDEF01".parse::<Uuid>().unwrap(),
            uuid
        );
    }

    #[rstest]
    #[case("too-short")]
    #[case("12345678_abcd-ef01-2345-6789abcdef01")]
    #[case("1234567g-abcd-ef01-2345-6789abcdef01")]
    #[case("+2345678-abcd-ef01-2345-6789abcdef01")]
    #[case("12345678-abcd-ef01-2345-6789abcdef0é")]
    fn test_parse_invalid(#[case] text: &str) {
        assert!(matches!(text.parse::<Uuid>(), Err(Error::InvalidUuid(_))));
    }

    #[test]
    fn test_nil() {
        assert!(Uuid::NIL.is_nil());
        assert_eq!(Uuid::default(), Uuid::NIL);
        assert_eq!(
            Uuid::NIL.to_string(),
            "00000000-0000-0000-0000-000000000000"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_as_string() {
        let uuid = Uuid::from_bytes(&BYTES, ByteOrder::Big).unwrap();
        let json = serde_json::to_string(&uuid).unwrap();
        assert_eq!(json, "\"00112233-4455-6677-8899-aabbccddeeff\"");
        assert_eq!(serde_json::from_str::<Uuid>(&json).unwrap(), uuid);
    }
}
