//! Buffered copy with a reusable buffer.
//!
//! Extraction copies every regular-file entry through one [`CopyBuffer`]
//! owned by the extractor, instead of allocating a fresh buffer per entry.

use std::io::Read;
use std::io::Write;
use std::io::{self};

use crate::ArchiveError;

/// Buffer size for copy operations (64KB).
const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Reusable heap buffer for copying entry content.
///
/// # Examples
///
/// ```
/// use tgzkit_core::copy::CopyBuffer;
/// use tgzkit_core::copy::copy_with_buffer;
///
/// let mut buffer = CopyBuffer::new();
/// let mut input = &b"entry content"[..];
/// let mut output = Vec::new();
///
/// let copied = copy_with_buffer(&mut input, &mut output, &mut buffer)?;
/// assert_eq!(copied, 13);
/// # Ok::<(), tgzkit_core::ArchiveError>(())
/// ```
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Box<[u8]>,
}

impl CopyBuffer {
    /// Creates a new zero-initialized copy buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the buffer size in bytes.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies data from reader to writer using the provided reusable buffer.
///
/// Returns the total number of bytes copied. Interrupted reads are retried.
///
/// # Errors
///
/// Returns [`ArchiveError::Io`] if reading from the source or writing to the
/// destination fails.
#[inline]
pub fn copy_with_buffer<R: Read, W: Write>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
) -> Result<u64, ArchiveError> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(ArchiveError::Io(e)),
        };

        writer.write_all(&buffer.buf[..bytes_read])?;
        total += bytes_read as u64;
    }

    Ok(total)
}
