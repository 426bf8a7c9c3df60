//! Dynamically typed records
//!
//! [`Record`] decodes whatever the tag under the cursor says is there, by
//! dispatching to the same typed decoders the rest of the crate uses. It
//! backs the diagnostic dump ([`DataStream::records`], [`DataStream::show`])
//! and is handy for reading streams whose layout is not known up front.
//!
//! Aggregates carry no framing, so a container of aggregates parses as a
//! container holding the first `len` field records, with the remaining
//! fields following at the top level. The bytes still re-encode identically.

use std::fmt;

use serde::Serialize;

use super::codec::{Decode, Encode};
use super::container::decode_header;
use super::error::StreamError;
use super::stream::DataStream;
use super::tag::TypeTag;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Record {
    Bool(bool),
    Char(u8),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    String(String),
    Vector(Vec<Record>),
    List(Vec<Record>),
    Map(Vec<(Record, Record)>),
    Set(Vec<Record>),
}

impl Record {
    pub fn tag(&self) -> TypeTag {
        match self {
            Record::Bool(_) => TypeTag::Bool,
            Record::Char(_) => TypeTag::Char,
            Record::Int32(_) => TypeTag::Int32,
            Record::Int64(_) => TypeTag::Int64,
            Record::Float(_) => TypeTag::Float,
            Record::Double(_) => TypeTag::Double,
            Record::String(_) => TypeTag::String,
            Record::Vector(_) => TypeTag::Vector,
            Record::List(_) => TypeTag::List,
            Record::Map(_) => TypeTag::Map,
            Record::Set(_) => TypeTag::Set,
        }
    }
}

fn decode_records(
    stream: &mut DataStream,
    tag: TypeTag,
    depth: usize,
) -> Result<Vec<Record>, StreamError> {
    let len = decode_header(stream, tag)?;
    let mut out = Vec::with_capacity(stream.capacity_hint(len));
    for _ in 0..len {
        out.push(decode_record(stream, depth + 1)?);
    }
    Ok(out)
}

fn encode_records(
    stream: &mut DataStream,
    tag: TypeTag,
    items: &[Record],
) -> Result<(), StreamError> {
    stream.write_tag(tag);
    stream.write_len(items.len())?;
    for item in items {
        item.encode(stream)?;
    }
    Ok(())
}

/// Decode one record whose enclosing containers are `depth` levels deep.
fn decode_record(stream: &mut DataStream, depth: usize) -> Result<Record, StreamError> {
    let offset = stream.position();
    let tag = stream.peek_tag()?;
    if tag.is_container() && depth >= stream.options().max_depth {
        return Err(StreamError::MalformedRecord {
            offset,
            reason: "nesting too deep",
        });
    }

    let record = match tag {
        TypeTag::Bool => Record::Bool(bool::decode(stream)?),
        TypeTag::Char => Record::Char(u8::decode(stream)?),
        TypeTag::Int32 => Record::Int32(i32::decode(stream)?),
        TypeTag::Int64 => Record::Int64(i64::decode(stream)?),
        TypeTag::Float => Record::Float(f32::decode(stream)?),
        TypeTag::Double => Record::Double(f64::decode(stream)?),
        TypeTag::String => Record::String(String::decode(stream)?),
        TypeTag::Vector => Record::Vector(decode_records(stream, tag, depth)?),
        TypeTag::List => Record::List(decode_records(stream, tag, depth)?),
        TypeTag::Set => Record::Set(decode_records(stream, tag, depth)?),
        TypeTag::Map => {
            let len = decode_header(stream, tag)?;
            let mut pairs = Vec::with_capacity(stream.capacity_hint(len));
            for _ in 0..len {
                let key = decode_record(stream, depth + 1)?;
                let value = decode_record(stream, depth + 1)?;
                pairs.push((key, value));
            }
            Record::Map(pairs)
        }
        TypeTag::Custom => {
            return Err(StreamError::MalformedRecord {
                offset,
                reason: "reserved custom tag",
            })
        }
    };
    Ok(record)
}

impl Decode for Record {
    /// Nested containers are accepted up to [`StreamOptions::max_depth`](super::StreamOptions)
    /// levels; deeper input fails with [`StreamError::MalformedRecord`].
    fn decode(stream: &mut DataStream) -> Result<Self, StreamError> {
        decode_record(stream, 0)
    }
}

impl Encode for Record {
    fn encode(&self, stream: &mut DataStream) -> Result<(), StreamError> {
        match self {
            Record::Bool(v) => v.encode(stream),
            Record::Char(v) => v.encode(stream),
            Record::Int32(v) => v.encode(stream),
            Record::Int64(v) => v.encode(stream),
            Record::Float(v) => v.encode(stream),
            Record::Double(v) => v.encode(stream),
            Record::String(v) => v.encode(stream),
            Record::Vector(items) => encode_records(stream, TypeTag::Vector, items),
            Record::List(items) => encode_records(stream, TypeTag::List, items),
            Record::Set(items) => encode_records(stream, TypeTag::Set, items),
            Record::Map(pairs) => {
                stream.write_tag(TypeTag::Map);
                stream.write_len(pairs.len())?;
                for (k, v) in pairs {
                    k.encode(stream)?;
                    v.encode(stream)?;
                }
                Ok(())
            }
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, open: &str, items: &[Record], close: &str) -> fmt::Result {
    f.write_str(open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    f.write_str(close)
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Bool(v) => write!(f, "{v}"),
            Record::Char(v) if v.is_ascii_graphic() || *v == b' ' => {
                write!(f, "'{}'", char::from(*v))
            }
            Record::Char(v) => write!(f, "'\\x{v:02x}'"),
            Record::Int32(v) => write!(f, "{v}"),
            Record::Int64(v) => write!(f, "{v}i64"),
            Record::Float(v) => write!(f, "{v:?}f32"),
            Record::Double(v) => write!(f, "{v:?}"),
            Record::String(v) => write!(f, "{v:?}"),
            Record::Vector(items) => write_items(f, "[", items, "]"),
            Record::List(items) => write_items(f, "list[", items, "]"),
            Record::Set(items) => write_items(f, "{", items, "}"),
            Record::Map(pairs) => {
                f.write_str("{")?;
                for (i, (k, v)) in pairs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl DataStream {
    /// Parse the whole buffer into records.
    ///
    /// Scans from offset 0 and puts the cursor back where it was, whether
    /// or not the scan succeeds. Stops at the first record that cannot be
    /// parsed.
    pub fn records(&mut self) -> Result<Vec<Record>, StreamError> {
        let saved = self.position();
        self.reset();
        let result = self.scan_records();
        self.rewind_to(saved);
        result
    }

    fn scan_records(&mut self) -> Result<Vec<Record>, StreamError> {
        let mut out = Vec::new();
        while self.remaining() > 0 {
            let record = self.read::<Record>().map_err(|err| match err {
                StreamError::UnknownTag { offset, .. } => StreamError::MalformedRecord {
                    offset,
                    reason: "unknown tag",
                },
                other => other,
            })?;
            out.push(record);
        }
        Ok(out)
    }

    /// Render the buffer as text, one top-level record per line.
    pub fn show(&mut self) -> Result<String, StreamError> {
        let records = self.records()?;
        let mut out = format!("data size = {}\n", self.size());
        for record in records {
            out.push_str(&record.to_string());
            out.push('\n');
        }
        Ok(out)
    }
}
