use bytes::{Bytes, BytesMut};
use tracing::trace;

use super::cursor::Cursor;
use super::header_list::{HeaderListBuilder, HeaderListView};
use crate::error::DecodeError;

/// Starts a route extension with no headers and no overrides.
pub fn route_ex() -> RouteExBuilder {
    RouteExBuilder::default()
}

/// Builder for the extension attached to a route: headers to match and headers to override.
#[derive(Debug, Default, Clone)]
#[must_use = "a builder does nothing until `build` is called"]
pub struct RouteExBuilder {
    headers: HeaderListBuilder,
    overrides: HeaderListBuilder,
}

impl RouteExBuilder {
    /// Appends a header to match.
    ///
    /// # Panics
    ///
    /// Panics if `name` is longer than 255 bytes or `value` longer than 65535 bytes.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push(name, value);
        self
    }

    /// Appends a header the route rewrites on the way through.
    ///
    /// # Panics
    ///
    /// Panics if `name` is longer than 255 bytes or `value` longer than 65535 bytes.
    pub fn r#override(mut self, name: &str, value: &str) -> Self {
        self.overrides.push(name, value);
        self
    }

    /// Encodes the record, consuming the builder.
    pub fn build(self) -> Bytes {
        let mut dst = BytesMut::with_capacity(self.headers.sizeof() + self.overrides.sizeof());
        self.headers.encode(&mut dst);
        self.overrides.encode(&mut dst);

        trace!(headers = self.headers.len(), overrides = self.overrides.len(), size = dst.len(), "built route extension");
        dst.freeze()
    }
}

/// Decoded route extension.
#[derive(Debug, Clone, Copy)]
pub struct RouteExView<'a> {
    headers: HeaderListView<'a>,
    overrides: HeaderListView<'a>,
    limit: usize,
}

impl<'a> RouteExView<'a> {
    /// Decodes a route extension from the start of `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if a length runs past the buffer, a length is negative,
    /// or a name or value is not UTF-8.
    pub fn wrap(buf: &'a [u8]) -> Result<Self, DecodeError> {
        let mut cursor = Cursor::new(buf);
        let headers = HeaderListView::read(&mut cursor)?;
        let overrides = HeaderListView::read(&mut cursor)?;
        Ok(Self { headers, overrides, limit: cursor.offset() })
    }

    pub fn headers(&self) -> HeaderListView<'a> {
        self.headers
    }

    pub fn overrides(&self) -> HeaderListView<'a> {
        self.overrides
    }

    /// Offset just past the end of the record
    pub fn limit(&self) -> usize {
        self.limit
    }
}
