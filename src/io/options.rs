//! Stream configuration
//!
//! [`StreamOptions`] can be built in code, taken from one of the presets, or
//! loaded from a JSON file:
//!
//! ```json
//! { "initial_capacity": 4096, "max_length": 65536, "max_depth": 32 }
//! ```
//!
//! Missing fields fall back to their defaults.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::StreamError;
use super::persist::SMALL_BUFFER_SIZE;

/// Largest length prefix an int32 can carry
pub const MAX_WIRE_LENGTH: usize = i32::MAX as usize;

/// Default bound on container nesting for dynamically decoded records
pub const DEFAULT_MAX_DEPTH: usize = 128;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamOptions {
    /// Bytes reserved when a stream is created empty
    pub initial_capacity: usize,
    /// Longest string or container accepted when decoding
    pub max_length: usize,
    /// Deepest container nesting accepted when decoding a [`Record`](super::Record)
    pub max_depth: usize,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            max_length: MAX_WIRE_LENGTH,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl StreamOptions {
    /// Limits suited to decoding untrusted input
    pub fn strict() -> Self {
        Self {
            initial_capacity: 0,
            max_length: 1 << 16,
            max_depth: 32,
        }
    }

    /// Preset for streams that are written in bulk
    pub fn bulk() -> Self {
        Self {
            initial_capacity: SMALL_BUFFER_SIZE,
            ..Self::default()
        }
    }

    /// Parse options from a JSON document
    pub fn from_json(json: &str) -> Result<Self, StreamError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read options from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, StreamError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn to_json_pretty(&self) -> Result<String, StreamError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
