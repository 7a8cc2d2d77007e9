//! Binary encoding/decoding of SPOE varints.

pub mod primitives;
pub mod varint;

pub use primitives::{Reader, Writer};
pub use varint::{
    LengthClass, decode_varint, encode_varint, length_class_of, length_classes, varint_len,
};
