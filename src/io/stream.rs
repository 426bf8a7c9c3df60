//! The tagged data stream
//!
//! [`DataStream`] owns one [`ByteBuffer`] and drives the recursive
//! encode/decode machinery over it. Writes append tagged records at the
//! tail; reads consume them from the cursor.
//!
//! # Examples
//! ```
//! use tagstream::DataStream;
//!
//! let mut stream = DataStream::new();
//! stream.write(&42i32)?.write("kitty")?.write(&vec![1.5f64, 2.5])?;
//!
//! let n: i32 = stream.read()?;
//! let name: String = stream.read()?;
//! let values: Vec<f64> = stream.read()?;
//! assert_eq!((n, name.as_str(), values), (42, "kitty", vec![1.5, 2.5]));
//! # Ok::<(), tagstream::StreamError>(())
//! ```

use super::buffer::ByteBuffer;
use super::codec::{Decode, Encode};
use super::error::StreamError;
use super::options::StreamOptions;
use super::tag::TypeTag;

/// Tag byte plus a one-byte payload
const MIN_RECORD_SIZE: usize = 2;

/// Native byte order of the host, detected once per stream.
///
/// The wire format is always little-endian; this is informational.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ByteOrder {
    BigEndian,
    LittleEndian,
}

impl ByteOrder {
    pub fn native() -> Self {
        if cfg!(target_endian = "big") {
            ByteOrder::BigEndian
        } else {
            ByteOrder::LittleEndian
        }
    }
}

/// Self-describing binary stream.
///
/// Not synchronized: share across threads only behind the caller's own lock.
#[derive(Clone, Debug)]
pub struct DataStream {
    buf: ByteBuffer,
    byte_order: ByteOrder,
    options: StreamOptions,
}

impl Default for DataStream {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStream {
    /// Create an empty stream with default options
    pub fn new() -> Self {
        Self::with_options(StreamOptions::default())
    }

    /// Create an empty stream with custom options
    pub fn with_options(options: StreamOptions) -> Self {
        Self {
            buf: ByteBuffer::with_capacity(options.initial_capacity),
            byte_order: ByteOrder::native(),
            options,
        }
    }

    /// Create a stream pre-loaded with a copy of `data`, cursor at the start
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::from_vec(data.to_vec())
    }

    /// Create a stream that takes ownership of `data`
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self {
            buf: ByteBuffer::from_vec(data),
            byte_order: ByteOrder::native(),
            options: StreamOptions::default(),
        }
    }

    /// Replace the options, keeping contents and cursor
    pub fn set_options(&mut self, options: StreamOptions) {
        self.options = options;
    }

    pub fn options(&self) -> &StreamOptions {
        &self.options
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Append a tagged value. Returns `self` so writes can be chained.
    ///
    /// On failure the buffer is truncated back to its size before the call,
    /// so a partly encoded value never lands in the stream.
    pub fn write<T: Encode + ?Sized>(&mut self, value: &T) -> Result<&mut Self, StreamError> {
        let start = self.size();
        value.encode(self).inspect_err(|err| {
            tracing::debug!(size = start, error = %err, "encode failed, buffer truncated");
            self.truncate(start);
        })?;
        Ok(self)
    }

    /// Read a value of type `T` at the cursor.
    ///
    /// On failure the cursor is restored to where it was before the call,
    /// including any tag byte that was already consumed.
    pub fn read<T: Decode>(&mut self) -> Result<T, StreamError> {
        let start = self.buf.position();
        T::decode(self).inspect_err(|err| {
            tracing::debug!(offset = start, error = %err, "decode failed, cursor restored");
            self.rewind_to(start);
        })
    }

    /// Read into an existing value. Same cursor guarantees as [`DataStream::read`];
    /// on failure `value` may hold partially decoded contents.
    pub fn read_into<T: Decode>(&mut self, value: &mut T) -> Result<(), StreamError> {
        let start = self.buf.position();
        value.decode_into(self).inspect_err(|_| self.rewind_to(start))
    }

    /// Append raw, untagged bytes.
    pub fn write_raw(&mut self, data: &[u8]) {
        self.buf.write(data);
    }

    /// Copy `out.len()` raw bytes from the cursor.
    pub fn read_raw(&mut self, out: &mut [u8]) -> Result<(), StreamError> {
        self.buf.read_into(out)
    }

    /// Tag of the record under the cursor, without consuming it
    pub fn peek_tag(&self) -> Result<TypeTag, StreamError> {
        let value = self.buf.peek()?;
        TypeTag::from_u8(value).ok_or(StreamError::UnknownTag {
            value,
            offset: self.buf.position(),
        })
    }

    pub(crate) fn rewind_to(&mut self, position: usize) {
        self.buf.rewind_to(position);
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.buf.truncate(len);
    }

    pub(crate) fn write_tag(&mut self, tag: TypeTag) {
        self.buf.push(tag as u8);
    }

    /// Consume the tag under the cursor, failing unless it is `expected`.
    pub(crate) fn expect_tag(&mut self, expected: TypeTag) -> Result<(), StreamError> {
        let offset = self.buf.position();
        let found = self.peek_tag()?;
        if found != expected {
            return Err(StreamError::TagMismatch {
                expected,
                found,
                offset,
            });
        }
        self.buf.read(1)?;
        Ok(())
    }

    pub(crate) fn read_array<const N: usize>(&mut self) -> Result<[u8; N], StreamError> {
        self.buf.read_array()
    }

    pub(crate) fn read_slice(&mut self, len: usize) -> Result<&[u8], StreamError> {
        self.buf.read(len)
    }

    /// Write a length prefix as a fully tagged int32 record.
    pub(crate) fn write_len(&mut self, len: usize) -> Result<(), StreamError> {
        let len = i32::try_from(len).map_err(|_| StreamError::LengthOverflow(len))?;
        len.encode(self)
    }

    /// Read a length prefix, rejecting negative values and values above
    /// the configured limit.
    pub(crate) fn read_len(&mut self) -> Result<usize, StreamError> {
        let offset = self.buf.position();
        let length = i32::decode(self)?;
        let len = usize::try_from(length)
            .map_err(|_| StreamError::NegativeLength { length, offset })?;
        if len > self.options.max_length {
            return Err(StreamError::LengthLimit {
                length: len,
                limit: self.options.max_length,
                offset,
            });
        }
        Ok(len)
    }

    /// Capacity to pre-allocate for `len` elements. The smallest record is
    /// two bytes, so no more than half the bytes left can be elements.
    pub(crate) fn capacity_hint(&self, len: usize) -> usize {
        len.min(self.buf.remaining() / MIN_RECORD_SIZE)
    }

    /// Raw bytes of the whole buffer
    pub fn data(&self) -> &[u8] {
        self.buf.as_slice()
    }

    /// Number of bytes in the buffer
    pub fn size(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Current read offset
    pub fn position(&self) -> usize {
        self.buf.position()
    }

    /// Bytes not yet read
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    /// Empty the buffer and rewind the cursor
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Rewind the cursor so the buffer can be read again
    pub fn reset(&mut self) {
        self.buf.reset();
    }

    pub(crate) fn replace_contents(&mut self, bytes: Vec<u8>) {
        self.buf.replace(bytes);
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf.into_vec()
    }
}
