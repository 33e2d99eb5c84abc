//! Counting reader for tracking content bytes streamed into an archive.

use std::io::Read;

/// Wrapper reader that tracks total bytes read.
///
/// The pipeline wraps every entry source in a `CountingReader` so it can
/// report content bytes (excluding tar framing) and detect sources that end
/// before their declared size.
///
/// # Examples
///
/// ```
/// use std::io::Read;
/// use tgzkit_core::io::CountingReader;
///
/// let mut reader = CountingReader::new(&b"Hello, World!"[..]);
/// let mut out = String::new();
/// reader.read_to_string(&mut out)?;
///
/// assert_eq!(reader.total_bytes(), 13);
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct CountingReader<R> {
    inner: R,
    bytes_read: u64,
}

impl<R> CountingReader<R> {
    /// Creates a new counting reader.
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            bytes_read: 0,
        }
    }

    /// Returns the total number of bytes successfully read.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.bytes_read
    }
}

impl<R: Read> Read for CountingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let bytes = self.inner.read(buf)?;
        self.bytes_read += bytes as u64;
        Ok(bytes)
    }
}
