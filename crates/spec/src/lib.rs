//! Test-data support for HTTP conformance scripts
//!
//! This crate provides the building blocks a conformance harness needs to drive an
//! HTTP implementation: binary extension records that travel alongside stream events,
//! and randomized payloads that are either valid or deliberately malformed.
//!
//! # Features
//!
//! - Flyweight-style builders for route, begin, data, end and challenge extensions
//! - Zero-copy views that decode the same binary layout
//! - Random bytes, printable ASCII, aligned and unaligned UTF-8, invalid UTF-8
//! - Value mutators for letter case, methods, header names and protocol versions
//! - A static function table for hosts that call functions by name
//!
//! # Example
//!
//! ```
//! use micro_http_spec::extension::{begin_ex, BeginExView};
//! use micro_http_spec::payload;
//!
//! let bytes = begin_ex().type_id(0x01).header(":method", "GET").build();
//!
//! let begin = BeginExView::wrap(&bytes).expect("built extension should decode");
//! assert_eq!(begin.type_id(), 0x01);
//! assert_eq!(begin.limit(), bytes.len());
//!
//! let body = payload::random_bytes_utf8(64);
//! assert!(std::str::from_utf8(&body).is_ok());
//! ```
//!
//! # Architecture
//!
//! - [`extension`]: record builders and decoding views
//! - [`payload`]: the randomized payload generator
//! - [`registry`]: name based function lookup for scripting hosts
//! - [`error`]: error types shared by all modules
//!
//! # Error Handling
//!
//! Precondition failures, such as an out-of-range split point or copy range, are
//! reported as [`FunctionError::Precondition`] and never clamped. Decoding a malformed
//! extension yields a [`DecodeError`]. Handing an encoder a string that does not fit
//! its length prefix is a programming error and panics.

pub mod error;
pub mod extension;
pub mod payload;
pub mod registry;

mod utils;
pub(crate) use utils::ensure;
pub use utils::copy_of_range;

pub use error::{DecodeError, FunctionError};
