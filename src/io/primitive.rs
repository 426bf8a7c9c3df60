//! Fixed-width primitives
//!
//! Each value is one tag byte followed by its payload. Multi-byte numbers
//! are always little-endian on the wire, whatever the host order.

use super::codec::{Decode, Encode};
use super::error::StreamError;
use super::stream::DataStream;
use super::tag::TypeTag;

macro_rules! impl_numeric {
    ($($ty:ty => $tag:ident),* $(,)?) => {$(
        impl Encode for $ty {
            fn encode(&self, stream: &mut DataStream) -> Result<(), StreamError> {
                stream.write_tag(TypeTag::$tag);
                stream.write_raw(&self.to_le_bytes());
                Ok(())
            }
        }

        impl Decode for $ty {
            fn decode(stream: &mut DataStream) -> Result<Self, StreamError> {
                stream.expect_tag(TypeTag::$tag)?;
                Ok(<$ty>::from_le_bytes(stream.read_array()?))
            }
        }
    )*};
}

impl_numeric! {
    i32 => Int32,
    i64 => Int64,
    f32 => Float,
    f64 => Double,
}

// Char records carry one opaque byte; both signednesses share the tag.
macro_rules! impl_char {
    ($($ty:ty),*) => {$(
        impl Encode for $ty {
            fn encode(&self, stream: &mut DataStream) -> Result<(), StreamError> {
                stream.write_tag(TypeTag::Char);
                stream.write_raw(&self.to_le_bytes());
                Ok(())
            }
        }

        impl Decode for $ty {
            fn decode(stream: &mut DataStream) -> Result<Self, StreamError> {
                stream.expect_tag(TypeTag::Char)?;
                Ok(<$ty>::from_le_bytes(stream.read_array()?))
            }
        }
    )*};
}

impl_char!(u8, i8);

impl Encode for bool {
    fn encode(&self, stream: &mut DataStream) -> Result<(), StreamError> {
        stream.write_tag(TypeTag::Bool);
        stream.write_raw(&[u8::from(*self)]);
        Ok(())
    }
}

impl Decode for bool {
    /// Any non-zero payload byte reads as `true`.
    fn decode(stream: &mut DataStream) -> Result<Self, StreamError> {
        stream.expect_tag(TypeTag::Bool)?;
        let [byte]: [u8; 1] = stream.read_array()?;
        Ok(byte != 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: Encode + Decode>(value: T) -> T {
        let mut stream = DataStream::new();
        stream.write(&value).unwrap();
        stream.read().unwrap()
    }

    #[test]
    fn test_int32_wire_layout() {
        let mut stream = DataStream::new();
        stream.write(&0x0102_0304i32).unwrap();
        assert_eq!(stream.data(), &[2, 0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_int64_wire_layout() {
        let mut stream = DataStream::new();
        stream.write(&-2i64).unwrap();
        assert_eq!(
            stream.data(),
            &[3, 0xfe, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn test_float_and_double_wire_layout() {
        let mut stream = DataStream::new();
        stream.write(&1.0f32).unwrap().write(&1.0f64).unwrap();
        let mut expected = vec![4];
        expected.extend_from_slice(&1.0f32.to_le_bytes());
        expected.push(5);
        expected.extend_from_slice(&1.0f64.to_le_bytes());
        assert_eq!(stream.data(), expected.as_slice());
    }

    #[test]
    fn test_bool_and_char_wire_layout() {
        let mut stream = DataStream::new();
        stream.write(&true).unwrap().write(&b'k').unwrap().write(&-1i8).unwrap();
        assert_eq!(stream.data(), &[0, 1, 1, b'k', 1, 0xff]);
    }

    #[test]
    fn test_integer_extremes() {
        for v in [i32::MIN, -1, 0, 1, i32::MAX] {
            assert_eq!(roundtrip(v), v);
        }
        for v in [i64::MIN, -1, 0, i64::MAX] {
            assert_eq!(roundtrip(v), v);
        }
    }

    #[test]
    fn test_float_bits_preserved() {
        for v in [0.0f32, -0.0, f32::MIN_POSITIVE, f32::MAX, f32::INFINITY] {
            assert_eq!(roundtrip(v).to_bits(), v.to_bits());
        }
        for v in [0.0f64, -0.0, f64::MIN, f64::EPSILON, f64::NEG_INFINITY] {
            assert_eq!(roundtrip(v).to_bits(), v.to_bits());
        }
        assert!(roundtrip(f64::NAN).is_nan());
    }

    #[test]
    fn test_nonzero_byte_is_true() {
        let mut stream = DataStream::from_bytes(&[TypeTag::Bool as u8, 7]);
        assert!(stream.read::<bool>().unwrap());
    }

    #[test]
    fn test_char_signedness_shares_tag() {
        let mut stream = DataStream::new();
        stream.write(&200u8).unwrap();
        assert_eq!(stream.read::<i8>().unwrap(), -56);
    }

    #[test]
    fn test_width_is_checked_by_tag() {
        let mut stream = DataStream::new();
        stream.write(&1i32).unwrap();
        assert!(matches!(
            stream.read::<i64>(),
            Err(StreamError::TagMismatch {
                expected: TypeTag::Int64,
                found: TypeTag::Int32,
                ..
            })
        ));
    }
}
