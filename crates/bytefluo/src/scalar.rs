//! Fixed-width integer scalars readable through a cursor.

use byteorder::{BigEndian, ByteOrder as _, LittleEndian};

use crate::ByteOrder;

mod sealed {
    pub trait Sealed {}
}

/// An 8, 16, 32 or 64-bit integer that can be decoded from bytes.
///
/// Signed types are decoded as the unsigned value of the same width and
/// reinterpreted bit for bit (two's complement). This trait is sealed.
pub trait Scalar: sealed::Sealed + Copy {
    /// Encoded width in bytes.
    const SIZE: usize;

    /// Decode from the first [`Self::SIZE`] bytes of `bytes`.
    ///
    /// Returns `None` when the slice is shorter than [`Self::SIZE`]. Bytes
    /// past the width are ignored.
    fn decode(bytes: &[u8], order: ByteOrder) -> Option<Self>;
}

impl sealed::Sealed for u8 {}
impl sealed::Sealed for i8 {}

impl Scalar for u8 {
    const SIZE: usize = 1;

    #[inline]
    fn decode(bytes: &[u8], _order: ByteOrder) -> Option<Self> {
        bytes.first().copied()
    }
}

impl Scalar for i8 {
    const SIZE: usize = 1;

    #[inline]
    fn decode(bytes: &[u8], _order: ByteOrder) -> Option<Self> {
        bytes.first().map(|&byte| byte as i8)
    }
}

macro_rules! impl_scalar {
    ($($ty:ty => $read:ident),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Scalar for $ty {
                const SIZE: usize = std::mem::size_of::<$ty>();

                #[inline]
                fn decode(bytes: &[u8], order: ByteOrder) -> Option<Self> {
                    let bytes = bytes.get(..Self::SIZE)?;
                    Some(match order {
                        ByteOrder::Big => BigEndian::$read(bytes),
                        ByteOrder::Little => LittleEndian::$read(bytes),
                    })
                }
            }
        )*
    };
}

impl_scalar! {
    u16 => read_u16,
    u32 => read_u32,
    u64 => read_u64,
    i16 => read_i16,
    i32 => read_i32,
    i64 => read_i64,
}
