use super::tag::TypeTag;

/// Everything that can go wrong while writing, reading or persisting a stream.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("tag mismatch at offset {offset}: expected {expected}, found {found}")]
    TagMismatch {
        expected: TypeTag,
        found: TypeTag,
        offset: usize,
    },

    #[error("unknown tag byte {value:#04x} at offset {offset}")]
    UnknownTag { value: u8, offset: usize },

    #[error("insufficient data at offset {offset}: requested {requested}, {available} available")]
    InsufficientData {
        offset: usize,
        requested: usize,
        available: usize,
    },

    #[error("negative length {length} at offset {offset}")]
    NegativeLength { length: i32, offset: usize },

    #[error("length {length} at offset {offset} exceeds limit {limit}")]
    LengthLimit {
        length: usize,
        limit: usize,
        offset: usize,
    },

    #[error("length {0} does not fit in an int32 prefix")]
    LengthOverflow(usize),

    #[error("string at offset {offset} is not valid utf-8")]
    InvalidUtf8 { offset: usize },

    #[error("malformed record at offset {offset}: {reason}")]
    MalformedRecord { offset: usize, reason: &'static str },

    #[error("argument {index} failed: {source}")]
    Argument {
        index: usize,
        #[source]
        source: Box<StreamError>,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StreamError {
    /// Wrap `self` with the position of the bulk argument that produced it.
    pub fn at_argument(self, index: usize) -> Self {
        Self::Argument {
            index,
            source: Box::new(self),
        }
    }
}
