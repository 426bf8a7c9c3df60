//! Sequences, mappings and sets
//!
//! Every container is written as its tag, a tagged int32 element count, and
//! then the elements in the container's own iteration order. Maps write
//! alternating keys and values. Decoding rebuilds the destination type with
//! its own insertion rules: later duplicate map keys overwrite earlier ones,
//! duplicate set elements collapse.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::hash::{BuildHasher, Hash};

use super::codec::{Decode, Encode};
use super::error::StreamError;
use super::stream::DataStream;
use super::tag::TypeTag;

fn encode_elements<'a, T, I>(
    stream: &mut DataStream,
    tag: TypeTag,
    len: usize,
    items: I,
) -> Result<(), StreamError>
where
    T: Encode + 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
{
    stream.write_tag(tag);
    stream.write_len(len)?;
    for item in items {
        item.encode(stream)?;
    }
    Ok(())
}

fn encode_pairs<'a, K, V, I>(
    stream: &mut DataStream,
    len: usize,
    pairs: I,
) -> Result<(), StreamError>
where
    K: Encode + 'a,
    V: Encode + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    stream.write_tag(TypeTag::Map);
    stream.write_len(len)?;
    for (k, v) in pairs {
        k.encode(stream)?;
        v.encode(stream)?;
    }
    Ok(())
}

/// Read the container header and return the element count.
pub(crate) fn decode_header(stream: &mut DataStream, tag: TypeTag) -> Result<usize, StreamError> {
    stream.expect_tag(tag)?;
    stream.read_len()
}

fn decode_elements<T, C>(stream: &mut DataStream, tag: TypeTag) -> Result<C, StreamError>
where
    T: Decode,
    C: Extend<T> + Default,
{
    let len = decode_header(stream, tag)?;
    let mut out = C::default();
    for _ in 0..len {
        out.extend(std::iter::once(T::decode(stream)?));
    }
    Ok(out)
}

fn decode_pairs<K, V, C>(stream: &mut DataStream) -> Result<C, StreamError>
where
    K: Decode,
    V: Decode,
    C: Extend<(K, V)> + Default,
{
    let len = decode_header(stream, TypeTag::Map)?;
    let mut out = C::default();
    for _ in 0..len {
        let key = K::decode(stream)?;
        let value = V::decode(stream)?;
        out.extend(std::iter::once((key, value)));
    }
    Ok(out)
}

impl<T: Encode> Encode for [T] {
    fn encode(&self, stream: &mut DataStream) -> Result<(), StreamError> {
        encode_elements(stream, TypeTag::Vector, self.len(), self)
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode(&self, stream: &mut DataStream) -> Result<(), StreamError> {
        self.as_slice().encode(stream)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, stream: &mut DataStream) -> Result<(), StreamError> {
        self.as_slice().encode(stream)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(stream: &mut DataStream) -> Result<Self, StreamError> {
        let len = decode_header(stream, TypeTag::Vector)?;
        let mut out = Vec::with_capacity(stream.capacity_hint(len));
        for _ in 0..len {
            out.push(T::decode(stream)?);
        }
        Ok(out)
    }
}

impl<T: Encode> Encode for VecDeque<T> {
    fn encode(&self, stream: &mut DataStream) -> Result<(), StreamError> {
        encode_elements(stream, TypeTag::Vector, self.len(), self)
    }
}

impl<T: Decode> Decode for VecDeque<T> {
    fn decode(stream: &mut DataStream) -> Result<Self, StreamError> {
        decode_elements(stream, TypeTag::Vector)
    }
}

impl<T: Encode> Encode for LinkedList<T> {
    fn encode(&self, stream: &mut DataStream) -> Result<(), StreamError> {
        encode_elements(stream, TypeTag::List, self.len(), self)
    }
}

impl<T: Decode> Decode for LinkedList<T> {
    fn decode(stream: &mut DataStream) -> Result<Self, StreamError> {
        decode_elements(stream, TypeTag::List)
    }
}

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn encode(&self, stream: &mut DataStream) -> Result<(), StreamError> {
        encode_pairs(stream, self.len(), self)
    }
}

impl<K: Decode + Ord, V: Decode> Decode for BTreeMap<K, V> {
    fn decode(stream: &mut DataStream) -> Result<Self, StreamError> {
        decode_pairs(stream)
    }
}

impl<K: Encode, V: Encode, S> Encode for HashMap<K, V, S> {
    fn encode(&self, stream: &mut DataStream) -> Result<(), StreamError> {
        encode_pairs(stream, self.len(), self)
    }
}

impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: Decode + Eq + Hash,
    V: Decode,
    S: BuildHasher + Default,
{
    fn decode(stream: &mut DataStream) -> Result<Self, StreamError> {
        decode_pairs(stream)
    }
}

impl<T: Encode> Encode for BTreeSet<T> {
    fn encode(&self, stream: &mut DataStream) -> Result<(), StreamError> {
        encode_elements(stream, TypeTag::Set, self.len(), self)
    }
}

impl<T: Decode + Ord> Decode for BTreeSet<T> {
    fn decode(stream: &mut DataStream) -> Result<Self, StreamError> {
        decode_elements(stream, TypeTag::Set)
    }
}

impl<T: Encode, S> Encode for HashSet<T, S> {
    fn encode(&self, stream: &mut DataStream) -> Result<(), StreamError> {
        encode_elements(stream, TypeTag::Set, self.len(), self)
    }
}

impl<T, S> Decode for HashSet<T, S>
where
    T: Decode + Eq + Hash,
    S: BuildHasher + Default,
{
    fn decode(stream: &mut DataStream) -> Result<Self, StreamError> {
        decode_elements(stream, TypeTag::Set)
    }
}
