//! The SPOE variable-length integer encoding.
//!
//! Values below 240 take a single byte. Larger values set the high nibble
//! of the first byte to `1111` and spill the rest of the magnitude into
//! continuation bytes of 7 bits each, subtracting a bias at every stage so
//! that no two encodings describe the same value:
//!
//! ```text
//! 0..=239          -> [v]
//! 240..=2287       -> [0xF0 | v & 0x0F, w]                  w < 128
//! 2288..=264431    -> [0xF0 | v & 0x0F, 0x80 | w & 0x7F, x]  x < 128
//! ...
//! ```
//!
//! The length of an encoding is known from its own bytes: a first byte
//! below 240 stands alone, otherwise bytes are read until one has its high
//! bit clear.

use lazy_static::lazy_static;

use crate::error::DecodeError;
use crate::limits::{
    CONTINUATION_BIAS, CONTINUATION_BITS, CONTINUATION_FLAG, FIRST_BYTE_BITS, FIRST_BYTE_MARKER,
    MAX_VARINT_BYTES, SINGLE_BYTE_LIMIT,
};

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes `value` into `buf`, returning the number of bytes written (1 to 10).
///
/// Every `u64` has an encoding, so this never fails. Bytes of `buf` past the
/// returned length are left untouched.
///
/// ```rust
/// use spoe_varint::{encode_varint, MAX_VARINT_BYTES};
///
/// let mut buf = [0u8; MAX_VARINT_BYTES];
/// let len = encode_varint(300, &mut buf);
/// assert_eq!(&buf[..len], &[0xFC, 0x03]);
/// ```
#[inline]
pub fn encode_varint(value: u64, buf: &mut [u8; MAX_VARINT_BYTES]) -> usize {
    if value < SINGLE_BYTE_LIMIT {
        buf[0] = value as u8;
        return 1;
    }

    buf[0] = (value as u8) | FIRST_BYTE_MARKER;
    let mut rest = (value - SINGLE_BYTE_LIMIT) >> FIRST_BYTE_BITS;
    let mut len = 1;
    while rest >= CONTINUATION_BIAS {
        buf[len] = (rest as u8) | CONTINUATION_FLAG;
        rest = (rest - CONTINUATION_BIAS) >> CONTINUATION_BITS;
        len += 1;
    }
    buf[len] = rest as u8;
    len + 1
}

/// Returns the number of bytes [`encode_varint`] would write for `value`.
#[inline]
pub fn varint_len(value: u64) -> usize {
    if value < SINGLE_BYTE_LIMIT {
        return 1;
    }

    let mut rest = (value - SINGLE_BYTE_LIMIT) >> FIRST_BYTE_BITS;
    let mut len = 2;
    while rest >= CONTINUATION_BIAS {
        rest = (rest - CONTINUATION_BIAS) >> CONTINUATION_BITS;
        len += 1;
    }
    len
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a varint from the start of `buf`.
///
/// Returns the value and the number of bytes consumed. Trailing bytes after
/// the encoding are ignored. Never reads past the end of `buf`; a missing
/// first byte or a missing continuation byte yields
/// [`DecodeError::OutOfBounds`].
///
/// Any byte pattern that terminates within `buf` decodes to some value.
/// Overlong continuation chains are accepted and their high-order
/// contributions wrap modulo 2^64.
///
/// ```rust
/// use spoe_varint::{decode_varint, DecodeError};
///
/// assert_eq!(decode_varint(&[0xFC, 0x03, 0xAA]), Ok((300, 2)));
/// assert!(matches!(decode_varint(&[0xFC]), Err(DecodeError::OutOfBounds { .. })));
/// ```
#[inline]
pub fn decode_varint(buf: &[u8]) -> Result<(u64, usize), DecodeError> {
    decode_varint_in(buf, "varint")
}

/// Same as [`decode_varint`] with a caller-chosen error context.
pub(crate) fn decode_varint_in(
    buf: &[u8],
    context: &'static str,
) -> Result<(u64, usize), DecodeError> {
    let Some(&first) = buf.first() else {
        return Err(DecodeError::OutOfBounds { context });
    };
    if u64::from(first) < SINGLE_BYTE_LIMIT {
        return Ok((u64::from(first), 1));
    }

    // The unmasked first byte is the base; the biases folded in by the
    // encoder cancel against its high nibble.
    let mut value = u64::from(first);
    let mut shift = FIRST_BYTE_BITS;
    let mut idx = 1;
    loop {
        let byte = *buf.get(idx).ok_or(DecodeError::OutOfBounds { context })?;
        if let Some(part) = u64::from(byte).checked_shl(shift) {
            value = value.wrapping_add(part);
        }
        if byte < CONTINUATION_FLAG {
            return Ok((value, idx + 1));
        }
        shift = shift.saturating_add(CONTINUATION_BITS);
        idx += 1;
    }
}

// =============================================================================
// LENGTH CLASSES
// =============================================================================

/// The inclusive range of values that encode to exactly `len` bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthClass {
    /// Encoded length in bytes.
    pub len: usize,
    /// Smallest value with this length.
    pub min: u64,
    /// Largest value with this length.
    pub max: u64,
}

impl LengthClass {
    /// Returns true if `value` encodes to this class's length.
    pub fn contains(&self, value: u64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

lazy_static! {
    static ref LENGTH_CLASSES: Vec<LengthClass> = build_length_classes();
}

/// Returns every length class in increasing order, from 1 byte up to
/// [`MAX_VARINT_BYTES`].
///
/// The classes partition the whole `u64` domain without gaps.
pub fn length_classes() -> &'static [LengthClass] {
    LENGTH_CLASSES.as_slice()
}

/// Returns the length class `value` belongs to.
pub fn length_class_of(value: u64) -> LengthClass {
    length_classes()[varint_len(value) - 1]
}

/// Derives the class table from the bias/shift recurrence.
///
/// After the first byte, `len - 1` trailing bytes can represent
/// `128 + 128^2 + ... + 128^(len - 1)` distinct working values, each of
/// which covers 16 first-byte values.
fn build_length_classes() -> Vec<LengthClass> {
    let mut classes = Vec::with_capacity(MAX_VARINT_BYTES);
    classes.push(LengthClass {
        len: 1,
        min: 0,
        max: SINGLE_BYTE_LIMIT - 1,
    });

    let radix = 1u64 << CONTINUATION_BITS;
    let mut weight = Some(1u64);
    let mut span = Some(0u64);
    for len in 2..=MAX_VARINT_BYTES {
        weight = weight.and_then(|w| w.checked_mul(radix));
        span = span.zip(weight).and_then(|(s, w)| s.checked_add(w));
        let max = span
            .and_then(|s| s.checked_mul(1 << FIRST_BYTE_BITS))
            .and_then(|s| s.checked_add(SINGLE_BYTE_LIMIT - 1))
            .unwrap_or(u64::MAX);
        let min = classes[classes.len() - 1].max + 1;
        classes.push(LengthClass { len, min, max });
        if max == u64::MAX {
            break;
        }
    }
    classes
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn encode(value: u64) -> Vec<u8> {
        let mut buf = [0u8; MAX_VARINT_BYTES];
        let len = encode_varint(value, &mut buf);
        buf[..len].to_vec()
    }

    #[test]
    fn test_known_encodings() {
        let cases: &[(u64, &[u8])] = &[
            (0, &[0x00]),
            (1, &[0x01]),
            (239, &[0xEF]),
            (240, &[0xF0, 0x00]),
            (241, &[0xF1, 0x00]),
            (300, &[0xFC, 0x03]),
            (2287, &[0xFF, 0x7F]),
            (2288, &[0xF0, 0x80, 0x00]),
            (264431, &[0xFF, 0xFF, 0x7F]),
            (264432, &[0xF0, 0x80, 0x80, 0x00]),
            (33818863, &[0xFF, 0xFF, 0xFF, 0x7F]),
            (33818864, &[0xF0, 0x80, 0x80, 0x80, 0x00]),
            (4328786159, &[0xFF, 0xFF, 0xFF, 0xFF, 0x7F]),
            (4328786160, &[0xF0, 0x80, 0x80, 0x80, 0x80, 0x00]),
            (
                u64::MAX,
                &[0xFF, 0xF0, 0xFE, 0xFE, 0xFE, 0xFE, 0xFE, 0xFE, 0xFE, 0x0E],
            ),
        ];

        for &(value, bytes) in cases {
            assert_eq!(encode(value), bytes, "encoding of {}", value);
            assert_eq!(decode_varint(bytes), Ok((value, bytes.len())), "decoding of {}", value);
        }
    }

    #[test]
    fn test_boundary_lengths() {
        let cases = [
            (0u64, 1usize),
            (239, 1),
            (240, 2),
            (2287, 2),
            (2288, 3),
            (264431, 3),
            (264432, 4),
            (33818863, 4),
            (33818864, 5),
            (4328786159, 5),
            (4328786160, 6),
            (4328786161, 6),
            (1161999626690365679, 9),
            (1161999626690365680, 10),
            (u64::MAX, 10),
        ];

        for (value, len) in cases {
            let bytes = encode(value);
            assert_eq!(bytes.len(), len, "length of {}", value);
            assert_eq!(varint_len(value), len, "varint_len of {}", value);
            assert_eq!(decode_varint(&bytes), Ok((value, len)));
        }
    }

    #[test]
    fn test_length_class_table() {
        let expected = [
            (1usize, 0u64, 239u64),
            (2, 240, 2287),
            (3, 2288, 264431),
            (4, 264432, 33818863),
            (5, 33818864, 4328786159),
            (6, 4328786160, 554084600047),
            (7, 554084600048, 70922828777711),
            (8, 70922828777712, 9078122083518703),
            (9, 9078122083518704, 1161999626690365679),
            (10, 1161999626690365680, u64::MAX),
        ];

        let classes = length_classes();
        assert_eq!(classes.len(), expected.len());
        for (class, (len, min, max)) in classes.iter().zip(expected) {
            assert_eq!(*class, LengthClass { len, min, max });
            assert_eq!(varint_len(min), len);
            assert_eq!(varint_len(max), len);
        }
    }

    #[test]
    fn test_length_class_of() {
        assert_eq!(length_class_of(0).len, 1);
        assert_eq!(length_class_of(2288).min, 2288);
        assert!(length_class_of(264431).contains(2288));
        assert!(!length_class_of(264431).contains(264432));
        assert_eq!(length_class_of(u64::MAX).max, u64::MAX);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            decode_varint(&[]),
            Err(DecodeError::OutOfBounds { context: "varint" })
        );
    }

    #[test]
    fn test_truncated_continuation() {
        // First byte promises a second one.
        assert!(decode_varint(&[0xF0]).unwrap_err().is_out_of_bounds());
        // Second byte has its continuation bit set but nothing follows.
        assert!(decode_varint(&[0xF0, 0x80]).unwrap_err().is_out_of_bounds());

        // Bound placed before the last byte of a valid encoding.
        let bytes = encode(264432);
        assert_eq!(bytes.len(), 4);
        assert!(decode_varint(&bytes[..3]).unwrap_err().is_out_of_bounds());
    }

    #[test]
    fn test_unterminated_chain() {
        let data = [0xFFu8; 32];
        assert!(decode_varint(&data).unwrap_err().is_out_of_bounds());
    }

    #[test]
    fn test_overlong_chain_is_accepted() {
        // 20 continuation bytes then a terminator: malformed but in bounds.
        let mut data = vec![0xFFu8; 21];
        data.push(0x00);
        data.push(0x55);
        let (_, consumed) = decode_varint(&data).unwrap();
        assert_eq!(consumed, 22);
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        assert_eq!(decode_varint(&[0x05, 0xFF, 0xFF]), Ok((5, 1)));
        assert_eq!(decode_varint(&[0xF0, 0x00, 0xF0]), Ok((240, 2)));
    }

    #[test]
    fn test_buffer_reuse() {
        let values = [u64::MAX, 0, 2288, 239, 4328786160, 240];

        let mut reused = [0xAAu8; MAX_VARINT_BYTES];
        for value in values {
            let len = encode_varint(value, &mut reused);
            assert_eq!(&reused[..len], encode(value).as_slice());
            assert_eq!(decode_varint(&reused[..len]), Ok((value, len)));
        }
    }

    proptest! {
        #[test]
        fn prop_roundtrip(value in any::<u64>()) {
            let mut buf = [0u8; MAX_VARINT_BYTES];
            let len = encode_varint(value, &mut buf);
            prop_assert!((1..=MAX_VARINT_BYTES).contains(&len));
            prop_assert_eq!(len, varint_len(value));
            prop_assert_eq!(decode_varint(&buf[..len]), Ok((value, len)));
        }

        #[test]
        fn prop_length_monotonic(a in any::<u64>(), b in any::<u64>()) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(varint_len(lo) <= varint_len(hi));
        }

        #[test]
        fn prop_class_contains_value(value in any::<u64>()) {
            let class = length_class_of(value);
            prop_assert!(class.contains(value));
            prop_assert_eq!(class.len, varint_len(value));
        }

        #[test]
        fn prop_truncation_is_out_of_bounds(value in any::<u64>(), cut in any::<usize>()) {
            let bytes = encode(value);
            let keep = cut % bytes.len();
            prop_assert!(decode_varint(&bytes[..keep]).unwrap_err().is_out_of_bounds());
        }

        #[test]
        fn prop_arbitrary_input_stays_in_bounds(
            data in proptest::collection::vec(any::<u8>(), 0..48)
        ) {
            match decode_varint(&data) {
                Ok((_, consumed)) => prop_assert!(consumed >= 1 && consumed <= data.len()),
                Err(err) => prop_assert!(err.is_out_of_bounds()),
            }
        }
    }
}
