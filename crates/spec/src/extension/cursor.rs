use bytes::Buf;

use crate::ensure;
use crate::error::DecodeError;

/// Bounds-checked forward reader over a borrowed buffer.
///
/// Every read either returns a slice of the wrapped buffer or a [`DecodeError`]
/// naming the offset where the buffer ran short.
#[derive(Debug, Clone)]
pub(crate) struct Cursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    #[inline]
    pub(crate) fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub(crate) fn has_remaining(&self) -> bool {
        self.offset < self.buf.len()
    }

    pub(crate) fn take(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        let available = self.buf.len() - self.offset;
        ensure!(n <= available, DecodeError::truncated(self.offset, n, available));

        let slice = &self.buf[self.offset..self.offset + n];
        self.offset += n;
        Ok(slice)
    }

    pub(crate) fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take(1)?.get_u8())
    }

    pub(crate) fn u16_le(&mut self) -> Result<u16, DecodeError> {
        Ok(self.take(2)?.get_u16_le())
    }

    pub(crate) fn i32_le(&mut self) -> Result<i32, DecodeError> {
        Ok(self.take(4)?.get_i32_le())
    }

    /// Reads a length field and returns it as a size, rejecting negative values.
    pub(crate) fn length(&mut self) -> Result<usize, DecodeError> {
        let offset = self.offset;
        let length = self.i32_le()?;
        usize::try_from(length).map_err(|_negative| DecodeError::NegativeLength { offset, length })
    }

    pub(crate) fn str(&mut self, n: usize) -> Result<&'a str, DecodeError> {
        let offset = self.offset;
        let bytes = self.take(n)?;
        std::str::from_utf8(bytes).map_err(|_utf8_error| DecodeError::InvalidUtf8 { offset })
    }
}
