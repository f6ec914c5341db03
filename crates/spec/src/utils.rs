//! Utility macros and byte-buffer helpers shared by the extension and payload modules.

use bytes::Bytes;

use crate::error::FunctionError;

/// A macro for early returns with an error if a condition is not met.
///
/// This is similar to the `assert!` macro, but returns an error instead of panicking.
/// Preconditions of the generator functions are checked with it so a host sees a
/// recoverable failure instead of a silently clamped result.
///
/// # Arguments
///
/// * `$predicate` - A boolean expression that should evaluate to true
/// * `$error` - The error value to return if the predicate is false
///
/// # Example
///
/// ```ignore
/// ensure!(split_at <= len, FunctionError::precondition("split point out of bounds"));
/// ```
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;

/// Copies the half-open range `[from, to)` of `bytes` into a new buffer.
///
/// # Errors
///
/// Returns [`FunctionError::Precondition`] if `from > to` or `to > bytes.len()`.
pub fn copy_of_range(bytes: &[u8], from: usize, to: usize) -> Result<Bytes, FunctionError> {
    ensure!(from <= to, FunctionError::precondition(format!("range start {from} is after range end {to}")));
    ensure!(
        to <= bytes.len(),
        FunctionError::precondition(format!("range end {to} exceeds buffer length {}", bytes.len()))
    );

    Ok(Bytes::copy_from_slice(&bytes[from..to]))
}
