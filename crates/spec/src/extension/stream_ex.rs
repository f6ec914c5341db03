//! Extensions for the begin, data, end and challenge stream events.
//!
//! The four records share one shape, a `type_id` followed by a single pair list, and
//! differ only in what that list means: request headers, a pushed promise, trailers,
//! or the headers of a challenge.

use bytes::{BufMut, Bytes, BytesMut};
use tracing::trace;

use super::TYPE_ID_SIZE;
use super::cursor::Cursor;
use super::header_list::{HeaderListBuilder, HeaderListView};
use crate::error::DecodeError;

/// The `type_id` plus pair list every stream extension is made of.
#[derive(Debug, Default, Clone)]
struct StreamEx {
    type_id: i32,
    pairs: HeaderListBuilder,
}

impl StreamEx {
    fn encode(&self, kind: &'static str) -> Bytes {
        let mut dst = BytesMut::with_capacity(TYPE_ID_SIZE + self.pairs.sizeof());
        dst.put_i32_le(self.type_id);
        self.pairs.encode(&mut dst);

        trace!(kind, type_id = self.type_id, pairs = self.pairs.len(), size = dst.len(), "built stream extension");
        dst.freeze()
    }
}

fn read_stream_ex(buf: &[u8]) -> Result<(i32, HeaderListView<'_>, usize), DecodeError> {
    let mut cursor = Cursor::new(buf);
    let type_id = cursor.i32_le()?;
    let pairs = HeaderListView::read(&mut cursor)?;
    Ok((type_id, pairs, cursor.offset()))
}

/// Starts a begin extension with `type_id` 0 and no headers.
pub fn begin_ex() -> BeginExBuilder {
    BeginExBuilder::default()
}

/// Starts a data extension with `type_id` 0 and no promise headers.
pub fn data_ex() -> DataExBuilder {
    DataExBuilder::default()
}

/// Starts an end extension with `type_id` 0 and no trailers.
pub fn end_ex() -> EndExBuilder {
    EndExBuilder::default()
}

/// Starts a challenge extension with `type_id` 0 and no headers.
pub fn challenge_ex() -> ChallengeExBuilder {
    ChallengeExBuilder::default()
}

/// Builder for the extension carried by a stream's begin event.
#[derive(Debug, Default, Clone)]
#[must_use = "a builder does nothing until `build` is called"]
pub struct BeginExBuilder {
    inner: StreamEx,
}

impl BeginExBuilder {
    /// Sets the type tag, replacing any earlier value.
    pub fn type_id(mut self, type_id: i32) -> Self {
        self.inner.type_id = type_id;
        self
    }

    /// Appends a request or response header.
    ///
    /// # Panics
    ///
    /// Panics if `name` is longer than 255 bytes or `value` longer than 65535 bytes.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.inner.pairs.push(name, value);
        self
    }

    /// Encodes the record, consuming the builder.
    pub fn build(self) -> Bytes {
        self.inner.encode("begin")
    }
}

/// Builder for the extension carried by a data event, holding a push promise.
#[derive(Debug, Default, Clone)]
#[must_use = "a builder does nothing until `build` is called"]
pub struct DataExBuilder {
    inner: StreamEx,
}

impl DataExBuilder {
    /// Sets the type tag, replacing any earlier value.
    pub fn type_id(mut self, type_id: i32) -> Self {
        self.inner.type_id = type_id;
        self
    }

    /// Appends a header of the promised request.
    ///
    /// # Panics
    ///
    /// Panics if `name` is longer than 255 bytes or `value` longer than 65535 bytes.
    pub fn promise(mut self, name: &str, value: &str) -> Self {
        self.inner.pairs.push(name, value);
        self
    }

    /// Encodes the record, consuming the builder.
    pub fn build(self) -> Bytes {
        self.inner.encode("data")
    }
}

/// Builder for the extension carried by a stream's end event.
#[derive(Debug, Default, Clone)]
#[must_use = "a builder does nothing until `build` is called"]
pub struct EndExBuilder {
    inner: StreamEx,
}

impl EndExBuilder {
    /// Sets the type tag, replacing any earlier value.
    pub fn type_id(mut self, type_id: i32) -> Self {
        self.inner.type_id = type_id;
        self
    }

    /// Appends a trailer.
    ///
    /// # Panics
    ///
    /// Panics if `name` is longer than 255 bytes or `value` longer than 65535 bytes.
    pub fn trailer(mut self, name: &str, value: &str) -> Self {
        self.inner.pairs.push(name, value);
        self
    }

    /// Encodes the record, consuming the builder.
    pub fn build(self) -> Bytes {
        self.inner.encode("end")
    }
}

/// Builder for the extension carried by a challenge event.
#[derive(Debug, Default, Clone)]
#[must_use = "a builder does nothing until `build` is called"]
pub struct ChallengeExBuilder {
    inner: StreamEx,
}

impl ChallengeExBuilder {
    /// Sets the type tag, replacing any earlier value.
    pub fn type_id(mut self, type_id: i32) -> Self {
        self.inner.type_id = type_id;
        self
    }

    /// Appends a challenge header.
    ///
    /// # Panics
    ///
    /// Panics if `name` is longer than 255 bytes or `value` longer than 65535 bytes.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.inner.pairs.push(name, value);
        self
    }

    /// Encodes the record, consuming the builder.
    pub fn build(self) -> Bytes {
        self.inner.encode("challenge")
    }
}

/// Decoded begin extension.
#[derive(Debug, Clone, Copy)]
pub struct BeginExView<'a> {
    type_id: i32,
    headers: HeaderListView<'a>,
    limit: usize,
}

impl<'a> BeginExView<'a> {
    /// Decodes a begin extension from the start of `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the buffer is too short for a length it contains, a
    /// length is negative, or a name or value is not UTF-8.
    pub fn wrap(buf: &'a [u8]) -> Result<Self, DecodeError> {
        let (type_id, headers, limit) = read_stream_ex(buf)?;
        Ok(Self { type_id, headers, limit })
    }

    pub fn type_id(&self) -> i32 {
        self.type_id
    }

    pub fn headers(&self) -> HeaderListView<'a> {
        self.headers
    }

    /// Offset just past the end of the record
    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// Decoded data extension.
#[derive(Debug, Clone, Copy)]
pub struct DataExView<'a> {
    type_id: i32,
    promise: HeaderListView<'a>,
    limit: usize,
}

impl<'a> DataExView<'a> {
    /// Decodes a data extension from the start of `buf`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`BeginExView::wrap`].
    pub fn wrap(buf: &'a [u8]) -> Result<Self, DecodeError> {
        let (type_id, promise, limit) = read_stream_ex(buf)?;
        Ok(Self { type_id, promise, limit })
    }

    pub fn type_id(&self) -> i32 {
        self.type_id
    }

    pub fn promise(&self) -> HeaderListView<'a> {
        self.promise
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// Decoded end extension.
#[derive(Debug, Clone, Copy)]
pub struct EndExView<'a> {
    type_id: i32,
    trailers: HeaderListView<'a>,
    limit: usize,
}

impl<'a> EndExView<'a> {
    /// Decodes an end extension from the start of `buf`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`BeginExView::wrap`].
    pub fn wrap(buf: &'a [u8]) -> Result<Self, DecodeError> {
        let (type_id, trailers, limit) = read_stream_ex(buf)?;
        Ok(Self { type_id, trailers, limit })
    }

    pub fn type_id(&self) -> i32 {
        self.type_id
    }

    pub fn trailers(&self) -> HeaderListView<'a> {
        self.trailers
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// Decoded challenge extension.
#[derive(Debug, Clone, Copy)]
pub struct ChallengeExView<'a> {
    type_id: i32,
    headers: HeaderListView<'a>,
    limit: usize,
}

impl<'a> ChallengeExView<'a> {
    /// Decodes a challenge extension from the start of `buf`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`BeginExView::wrap`].
    pub fn wrap(buf: &'a [u8]) -> Result<Self, DecodeError> {
        let (type_id, headers, limit) = read_stream_ex(buf)?;
        Ok(Self { type_id, headers, limit })
    }

    pub fn type_id(&self) -> i32 {
        self.type_id
    }

    pub fn headers(&self) -> HeaderListView<'a> {
        self.headers
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_pair(list: HeaderListView<'_>) -> (&str, &str) {
        let mut iter = list.iter();
        let header = iter.next().expect("list should hold one pair");
        assert!(iter.next().is_none());
        (header.name(), header.value())
    }

    #[test]
    fn begin_extension() {
        let bytes = begin_ex().type_id(0x01).header("name", "value").build();

        let begin = BeginExView::wrap(&bytes).unwrap();

        assert_eq!(begin.type_id(), 0x01);
        assert_eq!(only_pair(begin.headers()), ("name", "value"));
        assert!(begin.headers().sizeof() > 0);
        assert_eq!(begin.limit(), bytes.len());
    }

    #[test]
    fn data_extension() {
        let bytes = data_ex().type_id(0x01).promise("name", "value").build();

        let data = DataExView::wrap(&bytes).unwrap();

        assert_eq!(data.type_id(), 0x01);
        assert_eq!(only_pair(data.promise()), ("name", "value"));
        assert!(data.promise().sizeof() > 0);
        assert_eq!(data.limit(), bytes.len());
    }

    #[test]
    fn end_extension() {
        let bytes = end_ex().type_id(0x01).trailer("name", "value").build();

        let end = EndExView::wrap(&bytes).unwrap();

        assert_eq!(end.type_id(), 0x01);
        assert_eq!(only_pair(end.trailers()), ("name", "value"));
        assert!(end.trailers().sizeof() > 0);
        assert_eq!(end.limit(), bytes.len());
    }

    #[test]
    fn challenge_extension() {
        let bytes = challenge_ex().type_id(0x01).header("name", "value").build();

        let challenge = ChallengeExView::wrap(&bytes).unwrap();

        assert_eq!(challenge.type_id(), 0x01);
        assert_eq!(only_pair(challenge.headers()), ("name", "value"));
        assert!(challenge.headers().sizeof() > 0);
        assert_eq!(challenge.limit(), bytes.len());
    }

    #[test]
    fn defaults() {
        let bytes = begin_ex().build();

        assert_eq!(&bytes[..], &[0, 0, 0, 0, 0, 0, 0, 0]);

        let begin = BeginExView::wrap(&bytes).unwrap();
        assert_eq!(begin.type_id(), 0);
        assert!(begin.headers().is_empty());
    }

    #[test]
    fn type_id_layout() {
        let bytes = end_ex().type_id(0x0403_0201).build();

        assert_eq!(&bytes[..TYPE_ID_SIZE], &[0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn last_type_id_wins() {
        let bytes = data_ex().type_id(7).promise(":path", "/pushed").type_id(-3).build();

        let data = DataExView::wrap(&bytes).unwrap();

        assert_eq!(data.type_id(), -3);
        assert_eq!(data.promise().len(), 1);
    }

    #[test]
    fn trailers_keep_order() {
        let bytes = end_ex().trailer("grpc-status", "0").trailer("grpc-message", "").trailer("grpc-status", "1").build();

        let end = EndExView::wrap(&bytes).unwrap();

        let trailers: Vec<_> = end.trailers().iter().map(|h| (h.name(), h.value())).collect();
        assert_eq!(trailers, vec![("grpc-status", "0"), ("grpc-message", ""), ("grpc-status", "1")]);
    }

    #[test]
    fn short_buffer_fails() {
        let bytes = challenge_ex().type_id(1).header("www-authenticate", "Basic").build();

        assert_eq!(ChallengeExView::wrap(&bytes[..2]).unwrap_err(), DecodeError::truncated(0, 4, 2));
        assert!(matches!(ChallengeExView::wrap(&bytes[..bytes.len() - 1]), Err(DecodeError::Truncated { .. })));
    }

    #[test]
    fn invalid_utf8_value_fails() {
        let mut bytes = begin_ex().header("name", "value").build().to_vec();
        let last = bytes.len() - 1;
        bytes[last] = 0xFF;

        assert!(matches!(BeginExView::wrap(&bytes), Err(DecodeError::InvalidUtf8 { .. })));
    }
}
