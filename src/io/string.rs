//! Length-prefixed strings: tag, tagged int32 byte count, raw bytes.

use super::codec::{Decode, Encode};
use super::error::StreamError;
use super::stream::DataStream;
use super::tag::TypeTag;

impl Encode for str {
    fn encode(&self, stream: &mut DataStream) -> Result<(), StreamError> {
        stream.write_tag(TypeTag::String);
        stream.write_len(self.len())?;
        stream.write_raw(self.as_bytes());
        Ok(())
    }
}

impl Encode for String {
    fn encode(&self, stream: &mut DataStream) -> Result<(), StreamError> {
        self.as_str().encode(stream)
    }
}

impl Decode for String {
    fn decode(stream: &mut DataStream) -> Result<Self, StreamError> {
        stream.expect_tag(TypeTag::String)?;
        let len = stream.read_len()?;
        let offset = stream.position();
        let bytes = stream.read_slice(len)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| StreamError::InvalidUtf8 { offset })
    }
}
