//! File persistence for streams
//!
//! A persisted stream is exactly its buffer bytes: no magic number, no
//! version, no length header. [`DataStream::load`] replaces the buffer with
//! the file contents and rewinds the cursor.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use super::error::StreamError;
use super::stream::DataStream;

/// Default buffer size for file I/O (64KB)
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Small buffer size for memory-constrained scenarios (4KB)
pub const SMALL_BUFFER_SIZE: usize = 4 * 1024;

/// Create a buffered reader with default buffer size
pub fn buffered_reader<P: AsRef<Path>>(path: P) -> io::Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file))
}

/// Create a buffered writer with default buffer size, truncating any
/// existing file
pub fn buffered_writer<P: AsRef<Path>>(path: P) -> io::Result<BufWriter<File>> {
    let file = File::create(path)?;
    Ok(BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file))
}

impl DataStream {
    /// Write the buffer verbatim to `path`, overwriting the file.
    ///
    /// # Examples
    /// ```no_run
    /// use tagstream::DataStream;
    ///
    /// let mut stream = DataStream::new();
    /// stream.write("kitty")?.write(&18i32)?;
    /// stream.save("a.out")?;
    /// # Ok::<(), tagstream::StreamError>(())
    /// ```
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StreamError> {
        let path = path.as_ref();
        let mut writer = buffered_writer(path)?;
        self.save_to(&mut writer)?;
        tracing::debug!(path = %path.display(), bytes = self.size(), "stream saved");
        Ok(())
    }

    /// Write the buffer verbatim to any writer and flush it.
    pub fn save_to<W: Write>(&self, writer: &mut W) -> Result<(), StreamError> {
        writer.write_all(self.data())?;
        writer.flush()?;
        Ok(())
    }

    /// Replace the buffer with the contents of `path` and rewind the cursor.
    ///
    /// On error the stream is left unchanged.
    ///
    /// # Examples
    /// ```no_run
    /// use tagstream::DataStream;
    ///
    /// let mut stream = DataStream::new();
    /// stream.load("a.out")?;
    /// let name: String = stream.read()?;
    /// # Ok::<(), tagstream::StreamError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), StreamError> {
        let path = path.as_ref();
        let mut reader = buffered_reader(path)?;
        self.load_from(&mut reader)?;
        tracing::debug!(path = %path.display(), bytes = self.size(), "stream loaded");
        Ok(())
    }

    /// Replace the buffer with everything `reader` yields and rewind the cursor.
    pub fn load_from<R: Read>(&mut self, reader: &mut R) -> Result<(), StreamError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.replace_contents(bytes);
        Ok(())
    }

    /// Create a stream from the contents of `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StreamError> {
        let mut stream = DataStream::new();
        stream.load(path)?;
        Ok(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn test_save_writes_raw_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.out");

        let mut stream = DataStream::new();
        stream.write("kitty").unwrap().write(&18i32).unwrap();
        stream.save(&path).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), stream.data());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.out");
        std::fs::write(&path, vec![0xaa; 64]).unwrap();

        let mut stream = DataStream::new();
        stream.write(&true).unwrap();
        stream.save(&path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), vec![0, 1]);
    }

    #[test]
    fn test_load_replaces_and_rewinds() {
        let mut source = DataStream::new();
        source.write(&1i64).unwrap();

        let mut stream = DataStream::new();
        stream.write("old contents").unwrap();
        stream.read::<String>().unwrap();

        stream.load_from(&mut Cursor::new(source.data())).unwrap();
        assert_eq!(stream.data(), source.data());
        assert_eq!(stream.position(), 0);
        assert_eq!(stream.read::<i64>().unwrap(), 1);
    }

    #[test]
    fn test_load_missing_file_keeps_stream() {
        let dir = tempdir().unwrap();
        let mut stream = DataStream::new();
        stream.write(&3i32).unwrap();

        let err = stream.load(dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, StreamError::Io(_)));
        assert_eq!(stream.read::<i32>().unwrap(), 3);
    }

    #[test]
    fn test_save_to_writer() {
        let mut stream = DataStream::new();
        stream.write(&b'x').unwrap();
        let mut out = Vec::new();
        stream.save_to(&mut out).unwrap();
        assert_eq!(out, vec![1, b'x']);
    }
}
