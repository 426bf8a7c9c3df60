//! User-defined aggregates
//!
//! An aggregate has no framing of its own on the wire: it is just its fields,
//! each independently tagged, in declaration order. Both sides must agree
//! on the type out of band.
//!
//! The [`serializable!`](crate::serializable) macro takes the field list once
//! and generates both [`Encode`] and [`Decode`] from it, so the two directions
//! cannot drift apart.
//!
//! ```
//! use tagstream::{serializable, Serializable};
//!
//! #[derive(Debug, PartialEq)]
//! struct Cat {
//!     name: String,
//!     age: i32,
//! }
//!
//! serializable!(Cat { name, age });
//!
//! let cat = Cat { name: "kitty".into(), age: 18 };
//! let bytes = cat.to_bytes()?;
//! assert_eq!(Cat::from_bytes(&bytes)?, cat);
//! # Ok::<(), tagstream::StreamError>(())
//! ```

use super::codec::{Decode, Encode};
use super::error::StreamError;
use super::stream::DataStream;

/// Anything that can be both written to and read from a stream.
pub trait Serializable: Encode + Decode {
    /// Encode `self` into a fresh buffer
    fn to_bytes(&self) -> Result<Vec<u8>, StreamError> {
        let mut stream = DataStream::new();
        self.encode(&mut stream)?;
        Ok(stream.into_inner())
    }

    /// Decode one value from the start of `bytes`. Trailing bytes are ignored.
    fn from_bytes(bytes: &[u8]) -> Result<Self, StreamError> {
        DataStream::from_bytes(bytes).read()
    }
}

impl<T: Encode + Decode> Serializable for T {}

/// Implement [`Encode`] and [`Decode`] for a struct from a single ordered
/// field list.
///
/// Every listed field must itself be `Encode + Decode`. Fields left out of
/// the list are not written; add `..Default` to fill them from
/// `Default::default()` on decode.
///
/// ```
/// use tagstream::serializable;
///
/// #[derive(Default)]
/// struct Entry {
///     key: String,
///     hits: i64,
///     cached: Option<u32>,
/// }
///
/// serializable!(Entry { key, hits } ..Default);
/// ```
#[macro_export]
macro_rules! serializable {
    (@encode $ty:ty { $($field:ident),* }) => {
        impl $crate::Encode for $ty {
            fn encode(
                &self,
                stream: &mut $crate::DataStream,
            ) -> ::std::result::Result<(), $crate::StreamError> {
                $($crate::Encode::encode(&self.$field, stream)?;)*
                ::std::result::Result::Ok(())
            }
        }
    };

    (@decode_into $($field:ident),*) => {
        fn decode_into(
            &mut self,
            stream: &mut $crate::DataStream,
        ) -> ::std::result::Result<(), $crate::StreamError> {
            $($crate::Decode::decode_into(&mut self.$field, stream)?;)*
            ::std::result::Result::Ok(())
        }
    };

    ($ty:ty { $($field:ident),* $(,)? }) => {
        $crate::serializable!(@encode $ty { $($field),* });

        impl $crate::Decode for $ty {
            fn decode(
                stream: &mut $crate::DataStream,
            ) -> ::std::result::Result<Self, $crate::StreamError> {
                ::std::result::Result::Ok(Self {
                    $($field: $crate::Decode::decode(stream)?,)*
                })
            }

            $crate::serializable!(@decode_into $($field),*);
        }
    };

    ($ty:ty { $($field:ident),* $(,)? } ..Default) => {
        $crate::serializable!(@encode $ty { $($field),* });

        impl $crate::Decode for $ty {
            fn decode(
                stream: &mut $crate::DataStream,
            ) -> ::std::result::Result<Self, $crate::StreamError> {
                ::std::result::Result::Ok(Self {
                    $($field: $crate::Decode::decode(stream)?,)*
                    ..::std::default::Default::default()
                })
            }

            $crate::serializable!(@decode_into $($field),*);
        }
    };
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::{DataStream, StreamError, TypeTag};

    use super::Serializable;

    #[derive(Debug, Default, PartialEq)]
    struct Cat {
        name: String,
        age: i32,
    }

    crate::serializable!(Cat { name, age });

    #[derive(Debug, Default, PartialEq)]
    struct Shelter {
        cats: Vec<Cat>,
        by_room: BTreeMap<i32, Cat>,
        open: bool,
        scratch: Vec<u8>,
    }

    crate::serializable!(Shelter { cats, by_room, open } ..Default);

    fn kitty() -> Cat {
        Cat {
            name: "kitty".into(),
            age: 18,
        }
    }

    #[test]
    fn test_kitty_wire_layout() {
        let bytes = kitty().to_bytes().unwrap();
        assert_eq!(
            bytes,
            vec![
                6, 2, 5, 0, 0, 0, b'k', b'i', b't', b't', b'y', //
                2, 18, 0, 0, 0,
            ]
        );
        assert_eq!(Cat::from_bytes(&bytes).unwrap(), kitty());
    }

    #[test]
    fn test_no_aggregate_framing() {
        let mut a = DataStream::new();
        a.write(&kitty()).unwrap();

        let mut b = DataStream::new();
        b.write("kitty").unwrap().write(&18i32).unwrap();
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn test_nested_aggregates() {
        let mut by_room = BTreeMap::new();
        by_room.insert(3, kitty());
        let shelter = Shelter {
            cats: vec![
                kitty(),
                Cat {
                    name: "tom".into(),
                    age: 4,
                },
            ],
            by_room,
            open: true,
            scratch: vec![1, 2, 3],
        };

        let mut stream = DataStream::new();
        stream.write(&shelter).unwrap();
        let decoded: Shelter = stream.read().unwrap();

        assert_eq!(decoded.cats, shelter.cats);
        assert_eq!(decoded.by_room, shelter.by_room);
        assert!(decoded.open);
        // not in the field list
        assert!(decoded.scratch.is_empty());
    }

    #[test]
    fn test_decode_into_existing_instance() {
        let mut stream = DataStream::new();
        stream.write(&kitty()).unwrap();

        let mut cat = Cat::default();
        stream.read_into(&mut cat).unwrap();
        assert_eq!(cat, kitty());
    }

    #[test]
    fn test_wrong_layout_is_detected_by_field_tags() {
        let mut stream = DataStream::new();
        stream.write(&18i32).unwrap().write("kitty").unwrap();

        assert!(matches!(
            stream.read::<Cat>(),
            Err(StreamError::TagMismatch {
                expected: TypeTag::String,
                found: TypeTag::Int32,
                offset: 0
            })
        ));
        assert_eq!(stream.position(), 0);
    }
}
