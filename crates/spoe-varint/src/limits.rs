//! Protocol constants for the SPOE varint encoding.
//!
//! The bias and shift pairs are wire constants. Changing any of them
//! produces a different (incompatible) encoding.

/// Maximum number of bytes a single varint can occupy.
///
/// Values in `1161999626690365680..=u64::MAX` need the tenth byte.
pub const MAX_VARINT_BYTES: usize = 10;

/// Values below this encode as themselves in a single byte.
pub const SINGLE_BYTE_LIMIT: u64 = 240;

/// Number of value bits carried by the first byte of a multi-byte varint.
pub const FIRST_BYTE_BITS: u32 = 4;

/// High-nibble marker forced onto the first byte of a multi-byte varint.
pub const FIRST_BYTE_MARKER: u8 = 0xF0;

/// Bias subtracted before each continuation byte.
pub const CONTINUATION_BIAS: u64 = 128;

/// Number of value bits carried by each continuation byte.
pub const CONTINUATION_BITS: u32 = 7;

/// Continuation flag (high bit) of bytes after the first.
pub const CONTINUATION_FLAG: u8 = 0x80;

