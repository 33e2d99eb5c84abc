//! Archive assembly: enumerates entries for a source and streams them
//! through the pipeline.

use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::debug;
use tracing::trace;

use crate::ArchiveConfig;
use crate::ArchiveError;
use crate::Result;
use crate::creation::header::HeaderPolicy;
use crate::creation::header::is_archivable;
use crate::creation::header::validate_entry_name;
use crate::creation::pipeline::StreamPipeline;
use crate::creation::source::ArchiveSource;
use crate::creation::walker::TreeWalker;
use crate::io::FanOutWriter;
use crate::types::EntryKind;

/// Builds gzip-compressed tar streams.
///
/// # Examples
///
/// ```
/// use sha2::Digest;
/// use std::io::Write;
/// use tgzkit_core::ArchiveConfig;
/// use tgzkit_core::Archiver;
/// use tgzkit_core::creation::ArchiveSource;
///
/// let archiver = Archiver::new(ArchiveConfig::default().with_compression_level(9));
/// let source = ArchiveSource::Buffer { data: b"payload", header: None };
///
/// let mut archive = Vec::new();
/// let mut digest = sha2::Sha256::new();
/// let sinks: [&mut dyn Write; 2] = [&mut archive, &mut digest];
/// let written = archiver.archive(&source, sinks)?;
///
/// assert_eq!(written, 7);
/// assert_eq!(digest.finalize().as_slice(), sha2::Sha256::digest(&archive).as_slice());
/// # Ok::<(), tgzkit_core::ArchiveError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Archiver {
    config: ArchiveConfig,
}

impl Archiver {
    /// Creates an archiver with the given configuration.
    #[must_use]
    pub fn new(config: ArchiveConfig) -> Self {
        Self { config }
    }

    /// Archives `source` into every sink in `sinks`.
    ///
    /// Returns the number of content bytes written, excluding tar and gzip
    /// framing.
    ///
    /// On error the stream is still closed (tar and gzip trailers written),
    /// so sinks hold a well-formed archive of the entries written before the
    /// failure. Discarding it is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `sinks` is empty
    /// - the configuration is invalid
    /// - a buffer name override is empty, absolute or contains `..`
    ///   ([`ArchiveError::InvalidEntryName`]); nothing is written then
    /// - a source file cannot be read or a directory walk fails
    /// - any sink write fails
    pub fn archive<I, W>(&self, source: &ArchiveSource<'_>, sinks: I) -> Result<u64>
    where
        I: IntoIterator<Item = W>,
        W: Write,
    {
        self.config.validate()?;
        if let ArchiveSource::Buffer {
            header: Some(overrides),
            ..
        } = source
            && let Some(name) = &overrides.name
        {
            validate_entry_name(name)?;
        }
        let sink = FanOutWriter::new(sinks)?;
        debug!(sinks = sink.len(), "archive stream started");

        let mut pipeline = StreamPipeline::new(sink, self.config.compression());
        let policy = HeaderPolicy::new(source.header());

        let written = match source {
            ArchiveSource::Buffer { data, .. } => {
                let header = policy.resolve_buffer(data.len() as u64);
                pipeline.write_entry(&header, *data)?
            }
            ArchiveSource::SingleFile { path, .. } => {
                archive_file(&mut pipeline, &policy, path)?
            }
            ArchiveSource::DirectoryTree { root, .. } => {
                archive_tree(&mut pipeline, &policy, root)?
            }
        };

        pipeline.finish()?;
        debug!(bytes = written, "archive stream complete");
        Ok(written)
    }
}

fn archive_file<W: Write>(
    pipeline: &mut StreamPipeline<W>,
    policy: &HeaderPolicy<'_>,
    path: &Path,
) -> Result<u64> {
    let metadata = fs::metadata(path)?;
    if !is_archivable(&metadata) {
        debug!(path = %path.display(), "source is not a regular file, archive left empty");
        return Ok(0);
    }

    let base_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| ArchiveError::InvalidEntryName {
            path: path.to_path_buf(),
        })?;

    let header = policy.resolve_file(base_name.to_string(), metadata.len());
    let file = File::open(path)?;
    pipeline.write_entry(&header, file)
}

fn archive_tree<W: Write>(
    pipeline: &mut StreamPipeline<W>,
    policy: &HeaderPolicy<'_>,
    root: &Path,
) -> Result<u64> {
    let mut written = 0;

    for entry in TreeWalker::new(root).walk() {
        let entry = entry?;
        let header = policy.resolve_walked(entry.name, entry.kind, &entry.metadata);

        match entry.kind {
            EntryKind::Directory => {
                pipeline.write_entry(&header, std::io::empty())?;
            }
            EntryKind::Regular => {
                let file = File::open(&entry.path)?;
                written += pipeline.write_entry(&header, file)?;
            }
        }
    }

    trace!(root = %root.display(), bytes = written, "directory walk complete");
    Ok(written)
}
