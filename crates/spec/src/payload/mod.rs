//! Randomized payloads for stressing HTTP parsers
//!
//! [`PayloadGenerator`] produces byte sequences with exact validity properties:
//! uniformly random bytes, printable ASCII, UTF-8 that is aligned or deliberately split
//! inside a codepoint, and UTF-8 that is guaranteed to be rejected. It also mutates
//! protocol values so they differ from a given one: letter case, request methods,
//! header names and the protocol version.
//!
//! The free functions in this module run on a generator backed by the calling
//! thread's random source, so they are safe to call from any number of threads.
//! Tests that need reproducible output construct a [`PayloadGenerator::seeded`] instead.
//!
//! Results are only ever checked for structure: length, decodability and inequality.

mod domain;
mod generator;
mod utf8;

use bytes::Bytes;

use crate::error::FunctionError;

pub use domain::VALID_VERSION;
pub use generator::{PRINTABLE_ASCII, PayloadGenerator};

fn generator() -> PayloadGenerator {
    PayloadGenerator::new(rand::rng())
}

/// See [`PayloadGenerator::random_bytes`].
pub fn random_bytes(len: usize) -> Bytes {
    generator().random_bytes(len)
}

/// See [`PayloadGenerator::random_ascii`].
pub fn random_ascii(len: usize) -> Bytes {
    generator().random_ascii(len)
}

/// See [`PayloadGenerator::random_bytes_utf8`].
pub fn random_bytes_utf8(len: usize) -> Bytes {
    generator().random_bytes_utf8(len)
}

/// See [`PayloadGenerator::random_bytes_unaligned_utf8`].
///
/// # Errors
///
/// Returns [`FunctionError::Precondition`] if `split_at > len`.
pub fn random_bytes_unaligned_utf8(len: usize, split_at: usize) -> Result<Bytes, FunctionError> {
    generator().random_bytes_unaligned_utf8(len, split_at)
}

/// See [`PayloadGenerator::random_bytes_invalid_utf8`].
///
/// # Errors
///
/// Returns [`FunctionError::Precondition`] if `len` is `0`.
pub fn random_bytes_invalid_utf8(len: usize) -> Result<Bytes, FunctionError> {
    generator().random_bytes_invalid_utf8(len)
}

/// See [`PayloadGenerator::randomize_letter_case`].
pub fn randomize_letter_case(value: &str) -> String {
    generator().randomize_letter_case(value)
}

/// See [`PayloadGenerator::random_case_not`].
///
/// # Errors
///
/// Returns [`FunctionError::Precondition`] if `value` has no letter with a case pair.
pub fn random_case_not(value: &str) -> Result<String, FunctionError> {
    generator().random_case_not(value)
}

/// See [`PayloadGenerator::random_method_not`].
pub fn random_method_not(method: &str) -> &'static str {
    generator().random_method_not(method)
}

/// See [`PayloadGenerator::random_header_not`].
pub fn random_header_not(header: &str) -> &'static str {
    generator().random_header_not(header)
}

/// See [`PayloadGenerator::random_invalid_version`].
pub fn random_invalid_version() -> String {
    generator().random_invalid_version()
}
