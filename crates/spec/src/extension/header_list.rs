//! The key-value list shared by every extension record.
//!
//! [`HeaderListBuilder`] appends encoded pairs while a record is being built, and
//! [`HeaderListView`] reads a list back out of a finished buffer.

use bytes::{BufMut, BytesMut};

use super::cursor::Cursor;
use super::{LIST_LENGTH_SIZE, MAX_NAME_LEN, MAX_VALUE_LEN};
use crate::error::DecodeError;

/// Fixed bytes per pair: one byte name length plus two byte value length
const PAIR_OVERHEAD: usize = 3;

/// Longest encodable list body, bounded by the signed length prefix
const MAX_LIST_LEN: usize = i32::MAX as usize;

/// Accumulates encoded pairs in insertion order.
#[derive(Debug, Default, Clone)]
pub(crate) struct HeaderListBuilder {
    items: BytesMut,
    count: usize,
}

impl HeaderListBuilder {
    /// Appends one pair.
    ///
    /// # Panics
    ///
    /// Panics if `name` exceeds [`MAX_NAME_LEN`] bytes, `value` exceeds [`MAX_VALUE_LEN`]
    /// bytes, or the list body would grow past `i32::MAX` bytes.
    pub(crate) fn push(&mut self, name: &str, value: &str) {
        let Ok(name_len) = u8::try_from(name.len()) else {
            panic!("pair name is {} bytes, the limit is {MAX_NAME_LEN}", name.len());
        };
        let Ok(value_len) = u16::try_from(value.len()) else {
            panic!("pair value is {} bytes, the limit is {MAX_VALUE_LEN}", value.len());
        };

        let pair_size = PAIR_OVERHEAD + name.len() + value.len();
        assert!(self.items.len() + pair_size <= MAX_LIST_LEN, "pair list exceeds {MAX_LIST_LEN} bytes");

        self.items.reserve(pair_size);
        self.items.put_u8(name_len);
        self.items.put_slice(name.as_bytes());
        self.items.put_u16_le(value_len);
        self.items.put_slice(value.as_bytes());
        self.count += 1;
    }

    /// Number of pairs pushed so far
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.count
    }

    /// Encoded size including the length prefix
    #[inline]
    pub(crate) fn sizeof(&self) -> usize {
        LIST_LENGTH_SIZE + self.items.len()
    }

    /// Writes the length prefix followed by the pairs.
    pub(crate) fn encode(&self, dst: &mut BytesMut) {
        // push keeps items.len() within MAX_LIST_LEN
        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, reason = "bounded by MAX_LIST_LEN")]
        let length = self.items.len() as i32;
        dst.put_i32_le(length);
        dst.put_slice(&self.items);
    }
}

/// A decoded key-value list borrowing its bytes from the record buffer.
#[derive(Debug, Clone, Copy)]
pub struct HeaderListView<'a> {
    items: &'a [u8],
    count: usize,
}

impl<'a> HeaderListView<'a> {
    /// Reads a list at the cursor, validating every pair it contains.
    pub(crate) fn read(cursor: &mut Cursor<'a>) -> Result<Self, DecodeError> {
        let length = cursor.length()?;
        let items = cursor.take(length)?;

        let mut pairs = Cursor::new(items);
        let mut count = 0;
        while pairs.has_remaining() {
            read_pair(&mut pairs).map_err(|e| rebase(e, cursor.offset() - length))?;
            count += 1;
        }

        Ok(Self { items, count })
    }

    /// Encoded size including the length prefix
    #[inline]
    pub fn sizeof(&self) -> usize {
        LIST_LENGTH_SIZE + self.items.len()
    }

    /// Number of pairs in the list
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn iter(&self) -> HeaderIter<'a> {
        HeaderIter { cursor: Cursor::new(self.items) }
    }
}

impl<'a> IntoIterator for &HeaderListView<'a> {
    type Item = HeaderView<'a>;
    type IntoIter = HeaderIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One decoded pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderView<'a> {
    name: &'a str,
    value: &'a str,
}

impl<'a> HeaderView<'a> {
    #[inline]
    pub fn name(&self) -> &'a str {
        self.name
    }

    #[inline]
    pub fn value(&self) -> &'a str {
        self.value
    }
}

/// Iterator over the pairs of a [`HeaderListView`], in encoded order.
#[derive(Debug, Clone)]
pub struct HeaderIter<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Iterator for HeaderIter<'a> {
    type Item = HeaderView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.cursor.has_remaining() {
            return None;
        }
        // pairs were validated when the list was read
        read_pair(&mut self.cursor).ok()
    }
}

fn read_pair<'a>(cursor: &mut Cursor<'a>) -> Result<HeaderView<'a>, DecodeError> {
    let name_len = cursor.u8()?;
    let name = cursor.str(usize::from(name_len))?;
    let value_len = cursor.u16_le()?;
    let value = cursor.str(usize::from(value_len))?;
    Ok(HeaderView { name, value })
}

/// Shifts an error found inside a list body to its offset in the whole record.
fn rebase(error: DecodeError, base: usize) -> DecodeError {
    match error {
        DecodeError::Truncated { offset, required, available } => {
            DecodeError::Truncated { offset: base + offset, required, available }
        }
        DecodeError::NegativeLength { offset, length } => DecodeError::NegativeLength { offset: base + offset, length },
        DecodeError::InvalidUtf8 { offset } => DecodeError::InvalidUtf8 { offset: base + offset },
    }
}
