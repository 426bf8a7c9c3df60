//! Growable byte buffer with an independent forward-only read cursor
//!
//! Writes always append at the tail. Reads copy from the cursor and advance
//! it; they never touch the bytes themselves, so the same buffer can be read
//! again after [`ByteBuffer::reset`].

use super::error::StreamError;

/// Append-only byte storage plus a read cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    bytes: Vec<u8>,
    cursor: usize,
}

impl ByteBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty buffer with `capacity` bytes reserved
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            cursor: 0,
        }
    }

    /// Create a buffer holding a deep copy of `data`, cursor at the start
    pub fn from_slice(data: &[u8]) -> Self {
        Self {
            bytes: data.to_vec(),
            cursor: 0,
        }
    }

    /// Take ownership of `bytes`, cursor at the start
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self { bytes, cursor: 0 }
    }

    /// Append raw bytes at the end of the buffer.
    ///
    /// `Vec` growth is amortized doubling, so appends are O(1) amortized.
    pub fn write(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
    }

    /// Append a single raw byte
    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    /// Borrow the next `len` bytes at the cursor and advance past them.
    ///
    /// Fails with [`StreamError::InsufficientData`] without moving the cursor
    /// when fewer than `len` bytes remain.
    pub fn read(&mut self, len: usize) -> Result<&[u8], StreamError> {
        let start = self.cursor;
        let end = self.check_available(len)?;
        self.cursor = end;
        Ok(&self.bytes[start..end])
    }

    /// Copy exactly `out.len()` bytes into caller storage.
    pub fn read_into(&mut self, out: &mut [u8]) -> Result<(), StreamError> {
        let src = self.read(out.len())?;
        out.copy_from_slice(src);
        Ok(())
    }

    /// Read a fixed-size array at the cursor.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], StreamError> {
        let mut out = [0u8; N];
        self.read_into(&mut out)?;
        Ok(out)
    }

    /// Look at the byte under the cursor without consuming it.
    pub fn peek(&self) -> Result<u8, StreamError> {
        self.check_available(1)?;
        Ok(self.bytes[self.cursor])
    }

    fn check_available(&self, len: usize) -> Result<usize, StreamError> {
        let available = self.remaining();
        if len > available {
            return Err(StreamError::InsufficientData {
                offset: self.cursor,
                requested: len,
                available,
            });
        }
        Ok(self.cursor + len)
    }

    /// Rewind the read cursor to the start. Contents are unaffected.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// Empty the buffer and rewind the cursor.
    pub fn clear(&mut self) {
        self.bytes.clear();
        self.cursor = 0;
    }

    /// Drop everything past the first `len` bytes.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.bytes.truncate(len);
        self.cursor = self.cursor.min(self.bytes.len());
    }

    /// Replace the whole contents, rewinding the cursor.
    pub fn replace(&mut self, bytes: Vec<u8>) {
        self.bytes = bytes;
        self.cursor = 0;
    }

    /// Current read offset
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Move the cursor back to a position previously returned by
    /// [`ByteBuffer::position`].
    pub(crate) fn rewind_to(&mut self, position: usize) {
        debug_assert!(position <= self.bytes.len());
        self.cursor = position;
    }

    /// Bytes left between the cursor and the end
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.cursor)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }
}
