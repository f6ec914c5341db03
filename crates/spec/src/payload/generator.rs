use std::ops::RangeInclusive;

use bytes::{Bytes, BytesMut};
use rand::rngs::{SmallRng, ThreadRng};
use rand::{Rng, SeedableRng};
use tracing::trace;

use super::domain::{HEADERS, MALFORMED_VERSIONS, METHODS, VALID_VERSION};
use super::utf8::{self, INVALID_BYTES, MAX_WIDTH};
use crate::ensure;
use crate::error::FunctionError;

/// Printable ASCII, space through tilde
pub const PRINTABLE_ASCII: RangeInclusive<u8> = 0x20..=0x7E;

/// Produces random payloads from an explicit random source.
///
/// Every method draws from the generator's own source, so a generator built with
/// [`PayloadGenerator::seeded`] replays the same sequence of payloads. The default
/// generator uses the thread-local, OS-seeded [`rand::rng`].
#[derive(Debug, Clone)]
pub struct PayloadGenerator<R = ThreadRng> {
    rng: R,
}

impl Default for PayloadGenerator<ThreadRng> {
    fn default() -> Self {
        Self::new(rand::rng())
    }
}

impl PayloadGenerator<SmallRng> {
    /// A generator with a fixed seed, for reproducible tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> PayloadGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// `len` bytes drawn uniformly from the whole byte range.
    pub fn random_bytes(&mut self, len: usize) -> Bytes {
        let mut dst = BytesMut::zeroed(len);
        self.rng.fill_bytes(&mut dst);
        dst.freeze()
    }

    /// `len` bytes of printable ASCII.
    pub fn random_ascii(&mut self, len: usize) -> Bytes {
        (0..len).map(|_| self.rng.random_range(PRINTABLE_ASCII)).collect()
    }

    /// `len` bytes of complete UTF-8 codepoints of mixed widths.
    pub fn random_bytes_utf8(&mut self, len: usize) -> Bytes {
        let mut dst = BytesMut::with_capacity(len);
        utf8::put_utf8(&mut self.rng, &mut dst, len);
        dst.freeze()
    }

    /// `len` bytes of valid UTF-8 in which a multi-byte codepoint straddles `split_at`.
    ///
    /// The bytes before `split_at` end with the first part of the codepoint and the bytes
    /// from `split_at` start with the rest of it, so either half taken alone is cut inside
    /// a character while the whole buffer decodes. When `split_at` is `0` or `len` no
    /// codepoint can straddle it and the result is plain valid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionError::Precondition`] if `split_at > len`.
    pub fn random_bytes_unaligned_utf8(&mut self, len: usize, split_at: usize) -> Result<Bytes, FunctionError> {
        ensure!(
            split_at <= len,
            FunctionError::precondition(format!("split point {split_at} is out of bounds for length {len}"))
        );

        let mut dst = BytesMut::with_capacity(len);
        if split_at == 0 || split_at == len {
            trace!(len, split_at, "split point on buffer edge, generating aligned utf-8");
            utf8::put_utf8(&mut self.rng, &mut dst, len);
            return Ok(dst.freeze());
        }

        // bytes of the straddling codepoint available on each side of the split
        let max_before = split_at.min(MAX_WIDTH - 1);
        let max_after = (len - split_at).min(MAX_WIDTH - 1);

        let width = self.rng.random_range(2..=MAX_WIDTH.min(max_before + max_after));
        let before = self.rng.random_range(usize::max(1, width.saturating_sub(max_after))..=(width - 1).min(max_before));
        let after = width - before;

        utf8::put_utf8(&mut self.rng, &mut dst, split_at - before);
        utf8::put_char(&mut self.rng, &mut dst, width);
        utf8::put_utf8(&mut self.rng, &mut dst, len - split_at - after);

        trace!(len, split_at, width, before, "generated unaligned utf-8");
        Ok(dst.freeze())
    }

    /// `len` random bytes that a strict UTF-8 decoder always rejects.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionError::Precondition`] if `len` is `0`, since an empty buffer is
    /// always valid UTF-8.
    pub fn random_bytes_invalid_utf8(&mut self, len: usize) -> Result<Bytes, FunctionError> {
        ensure!(len > 0, FunctionError::precondition("invalid utf-8 needs at least one byte"));

        let mut dst = BytesMut::zeroed(len);
        self.rng.fill_bytes(&mut dst);

        let position = self.rng.random_range(0..len);
        dst[position] = INVALID_BYTES[self.rng.random_range(0..INVALID_BYTES.len())];

        Ok(dst.freeze())
    }

    /// Re-cases every letter of `value` independently at random.
    ///
    /// A letter is any character with a one-to-one upper/lower case pair, so `é` and `ü`
    /// are re-cased along with ASCII. Characters without such a pair (digits, punctuation,
    /// `ß`) are kept as they are, and the character count never changes.
    pub fn randomize_letter_case(&mut self, value: &str) -> String {
        value
            .chars()
            .map(|c| match case_pair(c) {
                Some((upper, _)) if self.rng.random_bool(0.5) => upper,
                Some((_, lower)) => lower,
                None => c,
            })
            .collect()
    }

    /// Like [`randomize_letter_case`](Self::randomize_letter_case), but never returns `value`
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`FunctionError::Precondition`] if `value` has no letter with a case pair,
    /// because no differing casing exists.
    pub fn random_case_not(&mut self, value: &str) -> Result<String, FunctionError> {
        ensure!(
            value.chars().any(|c| case_pair(c).is_some()),
            FunctionError::precondition(format!("{value:?} has no letters to re-case"))
        );

        // each attempt differs with probability of at least one half
        loop {
            let candidate = self.randomize_letter_case(value);
            if candidate != value {
                return Ok(candidate);
            }
        }
    }

    /// A known request method other than `method`, compared case-sensitively.
    pub fn random_method_not(&mut self, method: &str) -> &'static str {
        let candidates: Vec<&'static str> =
            METHODS.iter().map(http::Method::as_str).filter(|candidate| *candidate != method).collect();
        candidates[self.rng.random_range(0..candidates.len())]
    }

    /// A common header name other than `header`, compared case-insensitively.
    pub fn random_header_not(&mut self, header: &str) -> &'static str {
        let candidates: Vec<&'static str> = HEADERS
            .iter()
            .map(http::HeaderName::as_str)
            .filter(|candidate| !candidate.eq_ignore_ascii_case(header))
            .collect();
        candidates[self.rng.random_range(0..candidates.len())]
    }

    /// A protocol version string that is anything but `HTTP/1.1`.
    ///
    /// The result is either a well formed `HTTP/x.y` with another version number, a
    /// malformed version, or `HTTP/1.1` with its letters re-cased.
    pub fn random_invalid_version(&mut self) -> String {
        match self.rng.random_range(0..3) {
            0 => loop {
                let major: u8 = self.rng.random_range(0..=9);
                let minor: u8 = self.rng.random_range(0..=9);
                if (major, minor) != (1, 1) {
                    break format!("HTTP/{major}.{minor}");
                }
            },
            1 => MALFORMED_VERSIONS[self.rng.random_range(0..MALFORMED_VERSIONS.len())].to_owned(),
            _ => self.random_case_not(VALID_VERSION).unwrap_or_else(|_| MALFORMED_VERSIONS[0].to_owned()),
        }
    }
}

/// The upper and lower case forms of `c`, if both are single characters that map back
/// onto each other.
fn case_pair(c: char) -> Option<(char, char)> {
    let upper = single(c.to_uppercase())?;
    let lower = single(c.to_lowercase())?;
    if upper == lower || single(upper.to_lowercase())? != lower || single(lower.to_uppercase())? != upper {
        return None;
    }
    Some((upper, lower))
}

fn single(mut chars: impl Iterator<Item = char>) -> Option<char> {
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUNDS: usize = 200;

    fn generator() -> PayloadGenerator<SmallRng> {
        PayloadGenerator::seeded(0x5EED)
    }

    #[test]
    fn random_bytes_length() {
        let mut generator = generator();

        assert!(generator.random_bytes(0).is_empty());
        assert_eq!(generator.random_bytes(42).len(), 42);
    }

    #[test]
    fn seeded_generators_replay() {
        let mut first = PayloadGenerator::seeded(42);
        let mut second = PayloadGenerator::seeded(42);

        assert_eq!(first.random_bytes(64), second.random_bytes(64));
        assert_eq!(first.random_bytes_utf8(64), second.random_bytes_utf8(64));
    }

    #[test]
    fn ascii_is_printable() {
        let mut generator = generator();

        let ascii = generator.random_ascii(1024);

        assert_eq!(ascii.len(), 1024);
        assert!(ascii.iter().all(|b| PRINTABLE_ASCII.contains(b)));
    }

    #[test]
    fn utf8_decodes() {
        let mut generator = generator();

        for len in 0..ROUNDS {
            let bytes = generator.random_bytes_utf8(len);
            assert_eq!(bytes.len(), len);
            assert!(std::str::from_utf8(&bytes).is_ok());
        }
    }

    #[test]
    fn unaligned_utf8_straddles_split() {
        let mut generator = generator();

        for len in 2..64 {
            for split_at in 1..len {
                let bytes = generator.random_bytes_unaligned_utf8(len, split_at).unwrap();
                assert_eq!(bytes.len(), len);

                let text = std::str::from_utf8(&bytes).expect("whole buffer should decode");
                assert!(!text.is_char_boundary(split_at), "len {len} split {split_at} is aligned");
            }
        }
    }

    #[test]
    fn unaligned_utf8_split_on_edges() {
        let mut generator = generator();

        for (len, split_at) in [(0, 0), (1, 0), (1, 1), (42, 0), (42, 42)] {
            let bytes = generator.random_bytes_unaligned_utf8(len, split_at).unwrap();
            assert_eq!(bytes.len(), len);
            assert!(std::str::from_utf8(&bytes).is_ok());
        }
    }

    #[test]
    fn unaligned_utf8_split_out_of_bounds() {
        let mut generator = generator();

        let result = generator.random_bytes_unaligned_utf8(42, 43);

        assert!(matches!(result, Err(FunctionError::Precondition { .. })));
    }

    #[test]
    fn invalid_utf8_never_decodes() {
        let mut generator = generator();

        for len in 1..ROUNDS {
            let bytes = generator.random_bytes_invalid_utf8(len).unwrap();
            assert_eq!(bytes.len(), len);
            assert!(std::str::from_utf8(&bytes).is_err());
        }
    }

    #[test]
    fn invalid_utf8_needs_a_byte() {
        let mut generator = generator();

        assert!(matches!(generator.random_bytes_invalid_utf8(0), Err(FunctionError::Precondition { .. })));
    }

    #[test]
    fn letter_case_keeps_letters() {
        let mut generator = generator();

        for _ in 0..ROUNDS {
            let value = generator.randomize_letter_case("aBcdEfGHiJ");
            assert_eq!(value.to_lowercase(), "abcdefghij");
        }
    }

    #[test]
    fn letter_case_leaves_other_characters() {
        let mut generator = generator();

        for _ in 0..ROUNDS {
            let value = generator.randomize_letter_case("x-forwarded-for: 1.2.3.4 ß");
            assert_eq!(value.to_lowercase(), "x-forwarded-for: 1.2.3.4 ß");
            assert!(value.ends_with(": 1.2.3.4 ß"));
        }
    }

    #[test]
    fn letter_case_covers_non_ascii_letters() {
        let mut generator = generator();

        let values: Vec<String> = (0..ROUNDS).map(|_| generator.randomize_letter_case("Éü")).collect();

        assert!(values.iter().all(|value| value.to_lowercase() == "éü"));
        assert!(values.iter().any(|value| value.starts_with('é')));
        assert!(values.iter().any(|value| value.ends_with('Ü')));
    }

    #[test]
    fn case_not_differs() {
        let mut generator = generator();

        for _ in 0..ROUNDS {
            let value = generator.random_case_not("aBcdEfGHiJ").unwrap();
            assert_ne!(value, "aBcdEfGHiJ");
            assert_eq!(value.to_lowercase(), "abcdefghij");
        }
    }

    #[test]
    fn case_not_single_letter_flips() {
        let mut generator = generator();

        assert_eq!(generator.random_case_not("a").unwrap(), "A");
        assert_eq!(generator.random_case_not("/1-Z").unwrap(), "/1-z");
        assert_eq!(generator.random_case_not("ü").unwrap(), "Ü");
        assert_eq!(generator.random_case_not("1.Ä").unwrap(), "1.ä");
    }

    #[test]
    fn case_pairs() {
        assert_eq!(case_pair('a'), Some(('A', 'a')));
        assert_eq!(case_pair('É'), Some(('É', 'é')));
        assert_eq!(case_pair('ß'), None);
        assert_eq!(case_pair('İ'), None);
        assert_eq!(case_pair('7'), None);
    }

    #[test]
    fn case_not_without_letters() {
        let mut generator = generator();

        assert!(matches!(generator.random_case_not("1.1/-"), Err(FunctionError::Precondition { .. })));
        assert!(matches!(generator.random_case_not(""), Err(FunctionError::Precondition { .. })));
        assert!(matches!(generator.random_case_not("ß 1"), Err(FunctionError::Precondition { .. })));
    }

    #[test]
    fn method_not_get() {
        let mut generator = generator();

        for _ in 0..ROUNDS {
            let method = generator.random_method_not("GET");
            assert_ne!(method, "GET");
            assert!(METHODS.iter().any(|m| m.as_str() == method));
        }
    }

    #[test]
    fn method_not_unknown_picks_any_known() {
        let mut generator = generator();

        let method = generator.random_method_not("BREW");

        assert!(METHODS.iter().any(|m| m.as_str() == method));
    }

    #[test]
    fn header_not_authorization() {
        let mut generator = generator();

        for _ in 0..ROUNDS {
            assert!(!generator.random_header_not("authorization").eq_ignore_ascii_case("authorization"));
            assert!(!generator.random_header_not("Content-Length").eq_ignore_ascii_case("content-length"));
        }
    }

    #[test]
    fn invalid_version() {
        let mut generator = generator();

        for _ in 0..ROUNDS {
            assert_ne!(generator.random_invalid_version(), VALID_VERSION);
        }
    }
}
