//! Layered tar → gzip writer chain.
//!
//! ```text
//! entry bytes ─▶ tar::Builder ─▶ GzEncoder ─▶ FanOutWriter ─▶ sink₁ … sinkₙ
//! ```
//!
//! The serializer must be closed before the compressor: closing the builder
//! writes the tar end-of-archive blocks into the encoder, and only then can
//! the encoder emit the gzip trailer. [`StreamPipeline::finish`] does this
//! explicitly; [`Drop`] does the same best-effort when an error return skips
//! `finish`, leaving a truncated but well-formed stream.

use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Read;
use std::io::Write;
use tar::Builder;
use tracing::debug;
use tracing::trace;

use crate::ArchiveError;
use crate::Result;
use crate::creation::header::EntryHeader;
use crate::io::CountingReader;

/// Tar serializer layered on a gzip compressor layered on `W`.
///
/// # Examples
///
/// ```
/// use flate2::Compression;
/// use tgzkit_core::creation::HeaderPolicy;
/// use tgzkit_core::creation::StreamPipeline;
///
/// let header = HeaderPolicy::new(None).resolve_buffer(5);
/// let mut pipeline = StreamPipeline::new(Vec::new(), Compression::default());
/// pipeline.write_entry(&header, &b"hello"[..])?;
/// let archive = pipeline.finish()?;
/// assert_eq!(&archive[..2], &[0x1f, 0x8b]);
/// # Ok::<(), tgzkit_core::ArchiveError>(())
/// ```
pub struct StreamPipeline<W: Write> {
    builder: Option<Builder<GzEncoder<W>>>,
}

impl<W: Write> StreamPipeline<W> {
    /// Opens the compressor over `sink`, then the serializer over the
    /// compressor.
    #[must_use]
    pub fn new(sink: W, level: Compression) -> Self {
        let encoder = GzEncoder::new(sink, level);
        Self {
            builder: Some(Builder::new(encoder)),
        }
    }

    /// Writes one entry: the header record, then exactly `header.size` bytes
    /// from `reader`.
    ///
    /// Returns the number of content bytes written, excluding tar framing.
    ///
    /// # Errors
    ///
    /// Returns an error if the header cannot be encoded, a sink write fails,
    /// or `reader` ends before `header.size` bytes
    /// ([`ArchiveError::SizeMismatch`]).
    pub fn write_entry<R: Read>(&mut self, header: &EntryHeader, reader: R) -> Result<u64> {
        let builder = self.builder_mut()?;
        let mut tar_header = header.to_tar_header()?;
        let mut content = CountingReader::new(reader.take(header.size));

        builder.append_data(&mut tar_header, &header.name, &mut content)?;

        let actual = content.total_bytes();
        if actual != header.size {
            return Err(ArchiveError::SizeMismatch {
                name: header.name.clone(),
                expected: header.size,
                actual,
            });
        }

        trace!(name = %header.name, size = actual, kind = ?header.kind, "entry written");
        Ok(actual)
    }

    /// Closes the serializer, then the compressor, then flushes the sink.
    ///
    /// Returns the sink so callers can recover owned destinations.
    ///
    /// # Errors
    ///
    /// Returns an error if writing either trailer or flushing the sink fails.
    pub fn finish(mut self) -> Result<W> {
        let builder = self.builder.take().ok_or_else(finished_error)?;
        let encoder = builder.into_inner()?;
        let mut sink = encoder.finish()?;
        sink.flush()?;
        debug!("archive stream finished");
        Ok(sink)
    }

    fn builder_mut(&mut self) -> Result<&mut Builder<GzEncoder<W>>> {
        self.builder.as_mut().ok_or_else(finished_error)
    }
}

impl<W: Write> Drop for StreamPipeline<W> {
    fn drop(&mut self) {
        let Some(builder) = self.builder.take() else {
            return;
        };
        debug!("closing unfinished archive stream");
        let closed = builder
            .into_inner()
            .and_then(GzEncoder::finish)
            .and_then(|mut sink| sink.flush());
        if let Err(err) = closed {
            debug!(error = %err, "failed to close unfinished archive stream");
        }
    }
}

fn finished_error() -> ArchiveError {
    ArchiveError::Io(std::io::Error::other("archive stream already finished"))
}
