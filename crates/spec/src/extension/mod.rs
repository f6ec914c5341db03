//! Binary extension records for HTTP stream events
//!
//! Every stream event a conformance script emits or expects can carry a small binary
//! extension. This module builds those records and reads them back.
//!
//! # Components
//!
//! - Builders, created by [`route_ex`], [`begin_ex`], [`data_ex`], [`end_ex`] and
//!   [`challenge_ex`]. Each one accumulates pairs and is consumed by `build()`.
//! - Views: [`RouteExView`], [`BeginExView`], [`DataExView`], [`EndExView`] and
//!   [`ChallengeExView`] wrap a byte slice and decode it without copying.
//!
//! # Layout
//!
//! All integers are little-endian.
//!
//! ```text
//! route      := headers: List, overrides: List
//! begin      := type_id: i32, headers: List
//! data       := type_id: i32, promise: List
//! end        := type_id: i32, trailers: List
//! challenge  := type_id: i32, headers: List
//!
//! List       := length: i32, Pair*          (length counts the pair bytes)
//! Pair       := name_len: u8, name, value_len: u16, value
//! ```
//!
//! A record is exactly as long as the sum of its fields, so a reader that knows the
//! record kind finds its end from the length prefixes alone.

mod cursor;
mod header_list;
mod route_ex;
mod stream_ex;

pub use header_list::{HeaderIter, HeaderListView, HeaderView};
pub use route_ex::{RouteExBuilder, RouteExView, route_ex};
pub use stream_ex::{
    BeginExBuilder, BeginExView, ChallengeExBuilder, ChallengeExView, DataExBuilder, DataExView, EndExBuilder, EndExView,
    begin_ex, challenge_ex, data_ex, end_ex,
};

/// Size in bytes of the `type_id` field
pub const TYPE_ID_SIZE: usize = 4;

/// Size in bytes of a list length prefix
pub const LIST_LENGTH_SIZE: usize = 4;

/// Longest pair name, bounded by its one byte length prefix
pub const MAX_NAME_LEN: usize = u8::MAX as usize;

/// Longest pair value, bounded by its two byte length prefix
pub const MAX_VALUE_LEN: usize = u16::MAX as usize;
