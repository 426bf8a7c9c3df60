//! Encode/decode capability traits
//!
//! Every type that can live in a [`DataStream`] implements these two traits.
//! Primitives, strings and containers get implementations from this crate;
//! aggregates get theirs from the [`serializable!`](crate::serializable)
//! field-list macro.

use std::cmp::Reverse;

use super::error::StreamError;
use super::stream::DataStream;

pub trait Encode {
    /// # Description
    /// Append the tagged representation of `self` to `stream`.
    ///
    /// # Errors
    /// Fails with [`StreamError::LengthOverflow`] when a string or container
    /// holds more elements than an int32 length prefix can express.
    fn encode(&self, stream: &mut DataStream) -> Result<(), StreamError>;
}

pub trait Decode: Sized {
    /// # Description
    /// Read a value of this type at the stream's cursor.
    ///
    /// # Errors
    /// See [`StreamError`]. The stream restores its cursor when the
    /// top-level read fails, so implementations may bail out anywhere.
    fn decode(stream: &mut DataStream) -> Result<Self, StreamError>;

    /// Decode into an existing value, replacing its contents.
    fn decode_into(&mut self, stream: &mut DataStream) -> Result<(), StreamError> {
        *self = Self::decode(stream)?;
        Ok(())
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self, stream: &mut DataStream) -> Result<(), StreamError> {
        (**self).encode(stream)
    }
}

impl<T: Encode + ?Sized> Encode for &mut T {
    fn encode(&self, stream: &mut DataStream) -> Result<(), StreamError> {
        (**self).encode(stream)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode(&self, stream: &mut DataStream) -> Result<(), StreamError> {
        (**self).encode(stream)
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode(stream: &mut DataStream) -> Result<Self, StreamError> {
        T::decode(stream).map(Box::new)
    }
}

/// `Reverse` only changes ordering, so it is written as the wrapped value.
/// A `BTreeSet<Reverse<T>>` therefore goes on the wire in descending order.
impl<T: Encode> Encode for Reverse<T> {
    fn encode(&self, stream: &mut DataStream) -> Result<(), StreamError> {
        self.0.encode(stream)
    }
}

impl<T: Decode> Decode for Reverse<T> {
    fn decode(stream: &mut DataStream) -> Result<Self, StreamError> {
        T::decode(stream).map(Reverse)
    }
}
