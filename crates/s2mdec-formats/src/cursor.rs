//! Bounds-checked forward reader over an immutable byte buffer
//!
//! All multi-byte integers are little-endian. A read that would run past the
//! end of the buffer fails with [`DecodeError::TruncatedInput`] and leaves the
//! cursor where it was.

use crate::error::{DecodeError, Result};

/// Forward-only reader over a borrowed byte slice
///
/// The cursor tracks a `base` offset so that a cursor over a record payload
/// still reports positions relative to the start of the whole container.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
    base: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor at the start of `data`
    pub const fn new(data: &'a [u8]) -> Self {
        Self::with_base(data, 0)
    }

    /// Create a cursor whose reported offsets start at `base`
    pub const fn with_base(data: &'a [u8], base: usize) -> Self {
        Self { data, pos: 0, base }
    }

    /// Position relative to the start of this cursor's slice
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Absolute offset of the next byte to be read
    pub const fn offset(&self) -> usize {
        self.base + self.pos
    }

    /// Bytes left to read
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// True once every byte has been consumed
    pub const fn at_end(&self) -> bool {
        self.pos >= self.data.len()
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        if needed > self.remaining() {
            return Err(DecodeError::TruncatedInput {
                offset: self.offset(),
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Read exactly `n` bytes, borrowing from the underlying buffer
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Read a fixed-size array
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }

    /// Advance past `n` bytes
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read_bytes(n).map(|_| ())
    }

    /// Consume and return everything left in the buffer
    pub fn read_rest(&mut self) -> &'a [u8] {
        let rest = &self.data[self.pos..];
        self.pos = self.data.len();
        rest
    }

    /// Read a `u8`
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a little-endian `u16`
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    /// Read a little-endian `u32`
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Read a little-endian `u64`
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_array().map(u64::from_le_bytes)
    }

    /// Read a little-endian unsigned integer of `width` bytes (1, 2, 4 or 8)
    pub fn read_uint(&mut self, width: usize) -> Result<u64> {
        match width {
            1 => self.read_u8().map(u64::from),
            2 => self.read_u16().map(u64::from),
            4 => self.read_u32().map(u64::from),
            8 => self.read_u64(),
            _ => Err(DecodeError::malformed(
                self.offset(),
                format!("unsupported integer width {width}"),
            )),
        }
    }

    /// Read a UTF-8 string preceded by a `prefix_bytes`-wide length
    pub fn read_var_length_string(&mut self, prefix_bytes: usize) -> Result<&'a str> {
        let start = self.pos;
        let result = self.read_prefixed_str(prefix_bytes);
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    fn read_prefixed_str(&mut self, prefix_bytes: usize) -> Result<&'a str> {
        let len = self.read_uint(prefix_bytes)?;
        let len = usize::try_from(len).unwrap_or(usize::MAX);
        let offset = self.offset();
        let bytes = self.read_bytes(len)?;
        std::str::from_utf8(bytes)
            .map_err(|source| DecodeError::InvalidStringEncoding { offset, source })
    }
}
