//! Sequential reading and writing of SPOE varints.
//!
//! [`Reader`] is a bounds-checked cursor over a byte slice; [`Writer`]
//! appends to an owned buffer. Both also handle the varint-length-prefixed
//! byte strings SPOP uses for keys, strings and binary values.

use crate::codec::varint::{decode_varint_in, encode_varint};
use crate::error::DecodeError;
use crate::limits::MAX_VARINT_BYTES;

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding binary data.
///
/// Wraps a byte slice and provides methods for reading varints and raw
/// bytes with bounds checking. A failed read leaves the position unchanged.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader from a byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the current position in the data.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the remaining bytes.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    /// Returns the number of remaining bytes.
    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        let byte = *self
            .data
            .get(self.pos)
            .ok_or(DecodeError::OutOfBounds { context })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining_len() {
            return Err(DecodeError::OutOfBounds { context });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Reads a varint.
    #[inline]
    pub fn read_varint(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        let (value, consumed) = decode_varint_in(self.remaining(), context)?;
        self.pos += consumed;
        Ok(value)
    }

    /// Reads a varint length prefix followed by that many bytes.
    pub fn read_bytes_prefixed(
        &mut self,
        max_len: usize,
        field: &'static str,
    ) -> Result<&'a [u8], DecodeError> {
        let start = self.pos;
        let result = self.read_prefixed(max_len, field);
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    /// Reads a varint-length-prefixed UTF-8 string.
    pub fn read_str_prefixed(
        &mut self,
        max_len: usize,
        field: &'static str,
    ) -> Result<&'a str, DecodeError> {
        let start = self.pos;
        let result = self.read_prefixed(max_len, field).and_then(|bytes| {
            std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 { field })
        });
        if result.is_err() {
            self.pos = start;
        }
        result
    }

    fn read_prefixed(&mut self, max_len: usize, field: &'static str) -> Result<&'a [u8], DecodeError> {
        let len = self.read_varint(field)?;
        let n = usize::try_from(len)
            .ok()
            .filter(|&n| n <= max_len)
            .ok_or(DecodeError::LengthExceedsLimit {
                field,
                len,
                max: max_len,
            })?;
        self.read_bytes(n, field)
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding binary data.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a varint.
    #[inline]
    pub fn write_varint(&mut self, value: u64) {
        let mut buf = [0u8; MAX_VARINT_BYTES];
        let len = encode_varint(value, &mut buf);
        self.buf.extend_from_slice(&buf[..len]);
    }

    /// Writes a varint length prefix followed by the bytes.
    pub fn write_bytes_prefixed(&mut self, bytes: &[u8]) {
        self.write_varint(bytes.len() as u64);
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a varint-length-prefixed UTF-8 string.
    pub fn write_str_prefixed(&mut self, s: &str) {
        self.write_bytes_prefixed(s.as_bytes());
    }
}
