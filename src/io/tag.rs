//! One-byte type tags that prefix every independently readable record.

use std::fmt;

/// Discriminant written in front of each primitive, string and container.
///
/// The numeric values are part of the wire format and must never change.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Bool = 0,
    Char = 1,
    Int32 = 2,
    Int64 = 3,
    Float = 4,
    Double = 5,
    String = 6,
    Vector = 7,
    List = 8,
    Map = 9,
    Set = 10,
    /// Reserved. Aggregates are framed by field order alone, so this tag is
    /// never emitted.
    Custom = 11,
}

impl TypeTag {
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Bool),
            1 => Some(Self::Char),
            2 => Some(Self::Int32),
            3 => Some(Self::Int64),
            4 => Some(Self::Float),
            5 => Some(Self::Double),
            6 => Some(Self::String),
            7 => Some(Self::Vector),
            8 => Some(Self::List),
            9 => Some(Self::Map),
            10 => Some(Self::Set),
            11 => Some(Self::Custom),
            _ => None,
        }
    }

    /// Fixed payload width in bytes, or `None` for variable-length records.
    pub fn payload_width(self) -> Option<usize> {
        match self {
            Self::Bool | Self::Char => Some(1),
            Self::Int32 | Self::Float => Some(4),
            Self::Int64 | Self::Double => Some(8),
            _ => None,
        }
    }

    /// Vector, list, map or set
    pub fn is_container(self) -> bool {
        matches!(self, Self::Vector | Self::List | Self::Map | Self::Set)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Char => "char",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Vector => "vector",
            Self::List => "list",
            Self::Map => "map",
            Self::Set => "set",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
