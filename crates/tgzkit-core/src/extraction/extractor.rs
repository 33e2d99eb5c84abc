//! Unpacks a gzip-compressed tar stream into a directory tree.

use flate2::read::MultiGzDecoder;
use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use tracing::debug;
use tracing::trace;

use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;
use crate::types::EntryKind;
use crate::types::EntryPath;

/// Permission bits applied to extracted entries.
const PERMISSION_MASK: u32 = 0o777;

/// Materializes archive entries below a destination root.
///
/// Entries are processed strictly in stream order:
///
/// - **Directory**: created with all missing parents unless the target
///   already exists.
/// - **Regular file**: created or truncated and written in full. Parent
///   directories are not created; a well-formed stream lists them first.
/// - **Anything else** (symlinks, hard links, devices): skipped.
///
/// All-zero header blocks inside the stream and entries whose name is empty
/// are skipped. The first error aborts extraction; entries already written
/// stay on disk.
///
/// # Examples
///
/// ```no_run
/// use std::fs::File;
/// use tgzkit_core::Extractor;
///
/// let archive = File::open("bundle.tgz")?;
/// Extractor::new("/tmp/bundle").extract(archive)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Extractor {
    root: PathBuf,
    buffer: CopyBuffer,
}

impl Extractor {
    /// Creates an extractor writing below `root`.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            buffer: CopyBuffer::new(),
        }
    }

    /// Decompresses `compressed` and materializes every entry.
    ///
    /// Concatenated gzip members are read as one stream.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the gzip or tar stream is malformed or truncated
    /// - an entry name escapes the root ([`ArchiveError::PathTraversal`](crate::ArchiveError::PathTraversal))
    /// - a directory or file cannot be created or written
    pub fn extract<R: Read>(&mut self, compressed: R) -> Result<()> {
        debug!(root = %self.root.display(), "extraction started");

        let mut archive = tar::Archive::new(MultiGzDecoder::new(compressed));
        archive.set_ignore_zeros(true);

        for entry in archive.entries()? {
            let mut entry = entry?;
            self.extract_entry(&mut entry)?;
        }

        debug!(root = %self.root.display(), "extraction complete");
        Ok(())
    }

    fn extract_entry<R: Read>(&mut self, entry: &mut tar::Entry<'_, R>) -> Result<()> {
        let entry_type = entry.header().entry_type();
        let Some(kind) = EntryKind::from_tar(entry_type) else {
            trace!(?entry_type, "skipping unsupported entry type");
            return Ok(());
        };

        let path = EntryPath::parse(&entry.path()?)?;
        if path.is_empty() {
            trace!("skipping entry with empty name");
            return Ok(());
        }

        let target = path.resolve(&self.root);
        let mode = entry.header().mode()? & PERMISSION_MASK;

        match kind {
            EntryKind::Directory => create_directory(&target, mode)?,
            EntryKind::Regular => {
                let file = create_file(&target, mode)?;
                let mut writer = BufWriter::with_capacity(self.buffer.size(), file);
                let bytes = copy_with_buffer(entry, &mut writer, &mut self.buffer)?;
                writer.flush()?;
                trace!(path = %target.display(), bytes, "file extracted");
            }
        }

        Ok(())
    }
}

/// Creates `target` and any missing parents unless something already exists
/// at that path.
fn create_directory(target: &Path, mode: u32) -> Result<()> {
    if fs::metadata(target).is_ok() {
        return Ok(());
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(target)?;
    trace!(path = %target.display(), "directory created");
    Ok(())
}

fn create_file(target: &Path, mode: u32) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    Ok(options.open(target)?)
}
