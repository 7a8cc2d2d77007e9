//! Error types for SPOE varint decoding.

use thiserror::Error;

/// Error during binary decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The input ended before a complete value could be read.
    ///
    /// This is the only error the varint decoder itself produces: either
    /// the first byte is missing, or a continuation byte announced by the
    /// previous byte's high bit lies past the end of the input.
    #[error("out of bounds: input ended while reading {context}")]
    OutOfBounds { context: &'static str },

    /// A varint length prefix announced more bytes than the caller allows.
    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: u64,
        max: usize,
    },

    /// A length-prefixed string was not valid UTF-8.
    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },
}

impl DecodeError {
    /// Returns true if more input could make the same read succeed.
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, DecodeError::OutOfBounds { .. })
    }
}
