//! Bulk reads and writes over heterogeneous argument tuples
//!
//! ```
//! use tagstream::DataStream;
//!
//! let mut stream = DataStream::new();
//! stream.write_args((&7i32, "seven", &vec![7u8]))?;
//!
//! let (mut n, mut s, mut v) = (0i32, String::new(), Vec::<u8>::new());
//! stream.read_args((&mut n, &mut s, &mut v))?;
//! assert_eq!((n, s.as_str(), v), (7, "seven", vec![7]));
//! # Ok::<(), tagstream::StreamError>(())
//! ```

use super::codec::{Decode, Encode};
use super::error::StreamError;
use super::stream::DataStream;

/// A tuple of values written one after another.
pub trait WriteArgs {
    fn write_args(&self, stream: &mut DataStream) -> Result<(), StreamError>;
}

/// A tuple of `&mut` destinations filled one after another.
///
/// Stops at the first failing position and reports it through
/// [`StreamError::Argument`].
pub trait ReadArgs {
    fn read_args(self, stream: &mut DataStream) -> Result<(), StreamError>;
}

impl WriteArgs for () {
    fn write_args(&self, _stream: &mut DataStream) -> Result<(), StreamError> {
        Ok(())
    }
}

impl ReadArgs for () {
    fn read_args(self, _stream: &mut DataStream) -> Result<(), StreamError> {
        Ok(())
    }
}

macro_rules! impl_args {
    ($($name:ident : $idx:tt),+) => {
        impl<$($name: Encode),+> WriteArgs for ($($name,)+) {
            fn write_args(&self, stream: &mut DataStream) -> Result<(), StreamError> {
                $(self.$idx.encode(stream).map_err(|e| e.at_argument($idx))?;)+
                Ok(())
            }
        }

        impl<'a, $($name: Decode),+> ReadArgs for ($(&'a mut $name,)+) {
            fn read_args(self, stream: &mut DataStream) -> Result<(), StreamError> {
                $(self.$idx.decode_into(stream).map_err(|e| e.at_argument($idx))?;)+
                Ok(())
            }
        }
    };
}

impl_args!(A: 0);
impl_args!(A: 0, B: 1);
impl_args!(A: 0, B: 1, C: 2);
impl_args!(A: 0, B: 1, C: 2, D: 3);
impl_args!(A: 0, B: 1, C: 2, D: 3, E: 4);
impl_args!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5);
impl_args!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6);
impl_args!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7);
impl_args!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8);
impl_args!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9);
impl_args!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10);
impl_args!(A: 0, B: 1, C: 2, D: 3, E: 4, F: 5, G: 6, H: 7, I: 8, J: 9, K: 10, L: 11);

impl DataStream {
    /// Write every element of `args` in order.
    ///
    /// On failure nothing from this call stays in the buffer, including
    /// arguments that were written before the failing one.
    pub fn write_args<A: WriteArgs>(&mut self, args: A) -> Result<&mut Self, StreamError> {
        let start = self.size();
        args.write_args(self).inspect_err(|err| {
            tracing::debug!(size = start, error = %err, "bulk write failed");
            self.truncate(start);
        })?;
        Ok(self)
    }

    /// Read into every destination of `args` in order.
    ///
    /// On failure the cursor goes back to where the bulk read started.
    /// Destinations before the failing one keep their decoded values.
    pub fn read_args<A: ReadArgs>(&mut self, args: A) -> Result<(), StreamError> {
        let start = self.position();
        args.read_args(self).inspect_err(|err| {
            tracing::debug!(offset = start, error = %err, "bulk read failed");
            self.rewind_to(start);
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::TypeTag;

    #[test]
    fn test_zero_args_is_noop() {
        let mut stream = DataStream::new();
        stream.write_args(()).unwrap();
        assert!(stream.is_empty());
        stream.read_args(()).unwrap();
    }

    #[test]
    fn test_bulk_matches_sequential_writes() {
        let set: BTreeSet<i64> = [3, 1].into_iter().collect();

        let mut bulk = DataStream::new();
        bulk.write_args((&true, &b'c', "s", &set)).unwrap();

        let mut seq = DataStream::new();
        seq.write(&true)
            .unwrap()
            .write(&b'c')
            .unwrap()
            .write("s")
            .unwrap()
            .write(&set)
            .unwrap();

        assert_eq!(bulk.data(), seq.data());
    }

    struct Refuses;

    impl Encode for Refuses {
        fn encode(&self, stream: &mut DataStream) -> Result<(), StreamError> {
            stream.write_raw(&[TypeTag::Vector as u8]);
            Err(StreamError::LengthOverflow(usize::MAX))
        }
    }

    #[test]
    fn test_failed_bulk_write_is_rolled_back() {
        let mut stream = DataStream::new();
        stream.write(&9i64).unwrap();
        let size = stream.size();

        let err = stream.write_args((&1i32, "two", &Refuses)).unwrap_err();
        assert!(matches!(err, StreamError::Argument { index: 2, .. }));
        assert_eq!(stream.size(), size);
        assert_eq!(stream.read::<i64>().unwrap(), 9);
        assert_eq!(stream.remaining(), 0);
    }

    #[test]
    fn test_read_args_roundtrip() {
        let mut stream = DataStream::new();
        stream.write_args((&1.5f32, &-9i64, "x")).unwrap();

        let mut f = 0.0f32;
        let mut i = 0i64;
        let mut s = String::new();
        stream.read_args((&mut f, &mut i, &mut s)).unwrap();
        assert_eq!((f, i, s.as_str()), (1.5, -9, "x"));
        assert_eq!(stream.remaining(), 0);
    }

    #[test]
    fn test_read_args_reports_failing_position() {
        let mut stream = DataStream::new();
        stream.write_args((&1i32, &2i32, &3i32)).unwrap();

        let mut a = 0i32;
        let mut b = String::new();
        let mut c = 0i32;
        let err = stream.read_args((&mut a, &mut b, &mut c)).unwrap_err();

        match err {
            StreamError::Argument { index, source } => {
                assert_eq!(index, 1);
                assert!(matches!(
                    *source,
                    StreamError::TagMismatch {
                        expected: TypeTag::String,
                        found: TypeTag::Int32,
                        ..
                    }
                ));
            }
            other => panic!("unexpected error: {other}"),
        }
        // stopped at the failure, cursor rolled back
        assert_eq!(a, 1);
        assert_eq!(c, 0);
        assert_eq!(stream.position(), 0);
    }
}
