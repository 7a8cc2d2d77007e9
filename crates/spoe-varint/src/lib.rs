//! SPOE varint: the variable-length integer encoding of HAProxy's Stream
//! Processing Offload Protocol.
//!
//! This crate provides encoding and decoding of unsigned 64-bit integers in
//! the self-describing varint format used throughout SPOP frames (frame
//! IDs, stream IDs, key and value lengths, integer typed data).
//!
//! # Quick Start
//!
//! ```rust
//! use spoe_varint::{decode_varint, encode_varint, MAX_VARINT_BYTES};
//!
//! let mut buf = [0u8; MAX_VARINT_BYTES];
//! let len = encode_varint(2288, &mut buf);
//! assert_eq!(&buf[..len], &[0xF0, 0x80, 0x00]);
//!
//! let (value, consumed) = decode_varint(&buf[..len]).unwrap();
//! assert_eq!((value, consumed), (2288, 3));
//! ```
//!
//! For reading or writing several values in sequence, use
//! [`Reader`] and [`Writer`]:
//!
//! ```rust
//! use spoe_varint::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.write_varint(1);
//! writer.write_str_prefixed("max-frame-size");
//! writer.write_varint(16380);
//!
//! let mut reader = Reader::new(writer.as_bytes());
//! assert_eq!(reader.read_varint("stream_id").unwrap(), 1);
//! assert_eq!(reader.read_str_prefixed(255, "key").unwrap(), "max-frame-size");
//! assert_eq!(reader.read_varint("value").unwrap(), 16380);
//! ```
//!
//! # Modules
//!
//! - [`codec`]: The varint codec, length classes and the `Reader`/`Writer` cursor
//! - [`error`]: Error types
//! - [`limits`]: Protocol constants
//!
//! # Wire Format
//!
//! | Length | Values |
//! |---|---|
//! | 1 | `0..=239` |
//! | 2 | `240..=2287` |
//! | 3 | `2288..=264431` |
//! | 4 | `264432..=33818863` |
//! | 5 | `33818864..=4328786159` |
//! | ... | ... |
//! | 10 | `1161999626690365680..=u64::MAX` |
//!
//! See [`length_classes`] for the full table.
//!
//! # Security
//!
//! The decoder never reads past the end of its input and never panics.
//! Any byte sequence that terminates within the input decodes to some
//! value; there is no further validity check.

pub mod codec;
pub mod error;
pub mod limits;

// Re-export commonly used types at crate root
pub use codec::{
    LengthClass, Reader, Writer, decode_varint, encode_varint, length_class_of, length_classes,
    varint_len,
};
pub use error::DecodeError;
pub use limits::MAX_VARINT_BYTES;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
