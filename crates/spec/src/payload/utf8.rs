//! UTF-8 codepoint sampling.

use std::ops::RangeInclusive;

use bytes::{BufMut, BytesMut};
use rand::Rng;

/// Scalar value range for each encoded width, indexed by `width - 1`
const WIDTH_RANGES: [RangeInclusive<u32>; 4] = [0x00..=0x7F, 0x80..=0x7FF, 0x800..=0xFFFF, 0x1_0000..=0x10_FFFF];

/// Bytes that never appear anywhere in well-formed UTF-8: overlong lead bytes and
/// lead bytes for scalars above U+10FFFF
pub(crate) const INVALID_BYTES: [u8; 13] = [0xC0, 0xC1, 0xF5, 0xF6, 0xF7, 0xF8, 0xF9, 0xFA, 0xFB, 0xFC, 0xFD, 0xFE, 0xFF];

/// Longest UTF-8 encoding of a single scalar value
pub(crate) const MAX_WIDTH: usize = 4;

/// Samples a scalar value whose UTF-8 encoding is exactly `width` bytes.
pub(crate) fn random_char<R: Rng + ?Sized>(rng: &mut R, width: usize) -> char {
    debug_assert!((1..=MAX_WIDTH).contains(&width), "utf-8 width must be 1 to 4, got {width}");
    let range = WIDTH_RANGES[width - 1].clone();
    loop {
        // only the surrogate gap in the 3 byte range is rejected
        if let Some(c) = char::from_u32(rng.random_range(range.clone())) {
            return c;
        }
    }
}

/// Appends one codepoint of `width` bytes.
pub(crate) fn put_char<R: Rng + ?Sized>(rng: &mut R, dst: &mut BytesMut, width: usize) {
    let mut encoded = [0u8; MAX_WIDTH];
    dst.put_slice(random_char(rng, width).encode_utf8(&mut encoded).as_bytes());
}

/// Appends exactly `len` bytes of complete codepoints with randomly chosen widths.
pub(crate) fn put_utf8<R: Rng + ?Sized>(rng: &mut R, dst: &mut BytesMut, len: usize) {
    let mut remaining = len;
    while remaining > 0 {
        let width = rng.random_range(1..=remaining.min(MAX_WIDTH));
        put_char(rng, dst, width);
        remaining -= width;
    }
}
