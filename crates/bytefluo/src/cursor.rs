//! Bounded byte cursor over a borrowed slice.
//!
//! This module provides [`ByteCursor`], a cursor that reads integer scalars
//! in a selectable byte order and raw byte runs, and refuses any read or
//! seek that would leave its range.

use std::io::{self, Read, Seek, SeekFrom};

use zerocopy::{Immutable, IntoBytes};

use crate::{ByteOrder, Error, Result, Scalar};

/// A read-only, byte-order-aware view of `[begin, end)` within some
/// externally owned bytes.
///
/// The cursor never copies or owns the bytes it reads. The borrow `'a` ties
/// it to the backing storage: while a cursor over a `Vec` is alive the
/// vector cannot be pushed to, resized or dropped, since any of those may
/// move its contents and leave the view dangling.
///
/// Every failed read or seek leaves the cursor exactly as it was.
///
/// # Example
///
/// ```
/// use bytefluo::{ByteCursor, ByteOrder};
///
/// let data = [0x99, 0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF];
/// let mut cursor = ByteCursor::new(&data, ByteOrder::Big);
///
/// assert_eq!(cursor.read::<u16>().unwrap(), 0x99AA);
/// assert_eq!(cursor.read::<u8>().unwrap(), 0xBB);
/// assert_eq!(cursor.read::<u32>().unwrap(), 0xCCDDEEFF);
/// assert!(cursor.eos());
/// assert!(cursor.read::<u8>().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: usize,
    order: ByteOrder,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor spanning all of `data`.
    ///
    /// `data` must stay unmodified for as long as the cursor is used.
    #[inline]
    pub const fn new(data: &'a [u8], order: ByteOrder) -> Self {
        Self {
            data,
            position: 0,
            order,
        }
    }

    /// Create a cursor over `region[begin..end]`.
    ///
    /// `None` stands for an absent bound. Both absent gives an empty cursor;
    /// exactly one absent is an error, as is `end < begin` or an `end`
    /// past the region.
    ///
    /// ```
    /// use bytefluo::{ByteCursor, ByteOrder, ErrorKind};
    ///
    /// let data = [1, 2, 3, 4, 5, 6, 7];
    /// let cursor = ByteCursor::from_bounds(&data, Some(2), Some(5), ByteOrder::Big).unwrap();
    /// assert_eq!(cursor.size(), 3);
    ///
    /// let err = ByteCursor::from_bounds(&data, Some(1), None, ByteOrder::Big).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::NullEndNonNullBegin);
    /// ```
    pub fn from_bounds(
        region: &'a [u8],
        begin: Option<usize>,
        end: Option<usize>,
        order: ByteOrder,
    ) -> Result<Self> {
        let data = bounded(region, begin, end)?;
        Ok(Self::new(data, order))
    }

    /// Create a cursor over the in-memory bytes of a sequence of items.
    ///
    /// The cursor spans `items.len() * size_of::<T>()` bytes. Like
    /// [`ByteCursor::new`], it holds a borrow of `items`, so the owning
    /// collection cannot reallocate while the cursor lives.
    ///
    /// ```
    /// use bytefluo::{ByteCursor, ByteOrder};
    ///
    /// let words = [0u32; 8];
    /// assert_eq!(ByteCursor::from_items(&words, ByteOrder::Little).size(), 32);
    ///
    /// let empty: Vec<u16> = Vec::new();
    /// assert!(ByteCursor::from_items(&empty, ByteOrder::Big).eos());
    /// ```
    #[inline]
    pub fn from_items<T: IntoBytes + Immutable>(items: &'a [T], order: ByteOrder) -> Self {
        Self::new(items.as_bytes(), order)
    }

    /// Rebind to `region[begin..end]`, validated as in [`ByteCursor::from_bounds`].
    ///
    /// On success the position returns to the start of the new range and
    /// the byte order is kept. On failure nothing changes.
    pub fn set_range(
        &mut self,
        region: &'a [u8],
        begin: Option<usize>,
        end: Option<usize>,
    ) -> Result<()> {
        self.data = bounded(region, begin, end)?;
        self.position = 0;
        Ok(())
    }

    /// Rebind to all of `data`, resetting the position.
    #[inline]
    pub fn set_data(&mut self, data: &'a [u8]) {
        self.data = data;
        self.position = 0;
    }

    /// Select the byte order used by subsequent scalar reads.
    #[inline]
    pub fn set_byte_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    /// Get the byte order used by scalar reads.
    #[inline]
    pub const fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Check if the cursor sits at the end of its range.
    #[inline]
    pub const fn eos(&self) -> bool {
        self.position == self.data.len()
    }

    /// Get the number of bytes in the range.
    #[inline]
    pub const fn size(&self) -> usize {
        self.data.len()
    }

    /// Get the distance from the start of the range to the cursor.
    #[inline]
    pub const fn tell(&self) -> usize {
        self.position
    }

    /// Get the number of bytes left to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Get the unread part of the range.
    #[inline]
    pub fn remaining_bytes(&self) -> &'a [u8] {
        &self.data[self.position..]
    }

    /// Get the whole range, regardless of position.
    #[inline]
    pub const fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Read a scalar in the current byte order and advance past it.
    #[inline]
    pub fn read<T: Scalar>(&mut self) -> Result<T> {
        let value = self.peek::<T>()?;
        self.position += T::SIZE;
        Ok(value)
    }

    /// Decode a scalar at the cursor without advancing.
    #[inline]
    pub fn peek<T: Scalar>(&self) -> Result<T> {
        T::decode(self.remaining_bytes(), self.order).ok_or(Error::AttemptToReadPastEnd {
            needed: T::SIZE,
            available: self.remaining(),
        })
    }

    /// Read a u8.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read()
    }

    /// Read an i8.
    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        self.read()
    }

    /// Read a u16 in the current byte order.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read()
    }

    /// Read an i16 in the current byte order.
    #[inline]
    pub fn read_i16(&mut self) -> Result<i16> {
        self.read()
    }

    /// Read a u32 in the current byte order.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read()
    }

    /// Read an i32 in the current byte order.
    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read()
    }

    /// Read a u64 in the current byte order.
    #[inline]
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read()
    }

    /// Read an i64 in the current byte order.
    #[inline]
    pub fn read_i64(&mut self) -> Result<i64> {
        self.read()
    }

    /// Peek at bytes without advancing the position.
    #[inline]
    pub fn peek_bytes(&self, count: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if available < count {
            return Err(Error::AttemptToReadPastEnd {
                needed: count,
                available,
            });
        }
        Ok(&self.data[self.position..self.position + count])
    }

    /// Read `count` bytes verbatim and advance the position.
    ///
    /// The returned slice borrows the underlying bytes, not the cursor.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let bytes = self.peek_bytes(count)?;
        self.position += count;
        Ok(bytes)
    }

    /// Copy `dest.len()` bytes verbatim into `dest` and advance the position.
    ///
    /// On failure `dest` is left untouched.
    #[inline]
    pub fn read_into(&mut self, dest: &mut [u8]) -> Result<()> {
        let bytes = self.read_bytes(dest.len())?;
        dest.copy_from_slice(bytes);
        Ok(())
    }

    /// Read a fixed-size run of bytes.
    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        self.read_into(&mut out)?;
        Ok(out)
    }

    /// Move to `offset` bytes from the start of the range.
    ///
    /// Returns the new offset from the start.
    pub fn seek_begin(&mut self, offset: usize) -> Result<usize> {
        if offset > self.size() {
            return Err(Error::AttemptToSeekAfterEnd { size: self.size() });
        }
        self.position = offset;
        Ok(self.position)
    }

    /// Move to `offset` bytes before the end of the range.
    ///
    /// Returns the new offset from the start.
    pub fn seek_end(&mut self, offset: usize) -> Result<usize> {
        let target = self
            .size()
            .checked_sub(offset)
            .ok_or(Error::AttemptToSeekBeforeBeginning)?;
        self.position = target;
        Ok(self.position)
    }

    /// Move `delta` bytes forwards (positive) or backwards (negative).
    ///
    /// Returns the new offset from the start. The magnitude of `delta` is
    /// compared against the room on that side before anything is added, so
    /// `isize::MIN` and `isize::MAX` are rejected rather than wrapped.
    pub fn seek_current(&mut self, delta: isize) -> Result<usize> {
        let magnitude = delta.unsigned_abs();
        let target = if delta < 0 {
            self.position
                .checked_sub(magnitude)
                .ok_or(Error::AttemptToSeekBeforeBeginning)?
        } else {
            if magnitude > self.remaining() {
                return Err(Error::AttemptToSeekAfterEnd { size: self.size() });
            }
            self.position + magnitude
        };
        self.position = target;
        Ok(self.position)
    }
}

/// Validate optional bounds and slice them out of `region`.
fn bounded(region: &[u8], begin: Option<usize>, end: Option<usize>) -> Result<&[u8]> {
    match (begin, end) {
        (None, None) => Ok(&[]),
        (None, Some(end)) => Err(Error::NullBeginNonNullEnd { end }),
        (Some(begin), None) => Err(Error::NullEndNonNullBegin { begin }),
        (Some(begin), Some(end)) => {
            if end < begin {
                return Err(Error::EndPrecedesBegin { begin, end });
            }
            if end > region.len() {
                return Err(Error::RangeOutOfBounds {
                    end,
                    len: region.len(),
                });
            }
            Ok(&region[begin..end])
        }
    }
}

impl Read for ByteCursor<'_> {
    /// Copy up to `buf.len()` bytes; returns 0 once at the end.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let count = buf.len().min(self.remaining());
        self.read_into(&mut buf[..count])?;
        Ok(count)
    }
}

impl Seek for ByteCursor<'_> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let size = self.size();
        let position = match pos {
            SeekFrom::Start(offset) => {
                let offset =
                    usize::try_from(offset).map_err(|_| Error::AttemptToSeekAfterEnd { size })?;
                self.seek_begin(offset)?
            }
            SeekFrom::End(delta) => {
                if delta > 0 {
                    return Err(Error::AttemptToSeekAfterEnd { size }.into());
                }
                let offset = usize::try_from(delta.unsigned_abs())
                    .map_err(|_| Error::AttemptToSeekBeforeBeginning)?;
                self.seek_end(offset)?
            }
            SeekFrom::Current(delta) => {
                let delta = isize::try_from(delta).map_err(|_| {
                    if delta < 0 {
                        Error::AttemptToSeekBeforeBeginning
                    } else {
                        Error::AttemptToSeekAfterEnd { size }
                    }
                })?;
                self.seek_current(delta)?
            }
        };
        Ok(position as u64)
    }
}
