//! High-level public API for building and unpacking `.tar.gz` streams.
//!
//! These functions use [`ArchiveConfig::default`]; construct an
//! [`Archiver`] directly to change the compression level.

use std::io::Read;
use std::io::Write;
use std::path::Path;

use crate::ArchiveConfig;
use crate::Result;
use crate::creation::ArchiveSource;
use crate::creation::Archiver;
use crate::creation::HeaderOverride;
use crate::extraction::Extractor;

/// Archives a byte buffer as a single entry.
///
/// Without an override the entry is named after the current UTC time
/// (`YYYYMMDDTHHMMSS`), owned by `user:user`, mode `0644`.
///
/// Returns the number of content bytes written, always `data.len()` on
/// success.
///
/// # Arguments
///
/// * `data` - Entry content
/// * `header` - Optional metadata override (name, owner, group, mode, mtime)
/// * `sinks` - One or more destinations; each receives the identical stream
///
/// # Errors
///
/// Returns an error if:
/// - the override name is empty, absolute or contains a `..` segment
///   ([`ArchiveError::InvalidEntryName`](crate::ArchiveError::InvalidEntryName)),
///   checked before any sink is written
/// - `sinks` is empty
/// - any sink write fails
///
/// # Examples
///
/// ```
/// use sha2::Digest;
/// use std::io::Write;
///
/// let mut archive = Vec::new();
/// let mut hasher = sha2::Sha256::new();
/// let sinks: [&mut dyn Write; 2] = [&mut archive, &mut hasher];
///
/// let written = tgzkit_core::archive_buffer(b"test file\nline1\nline2\n", None, sinks)?;
/// assert_eq!(written, 22);
/// println!("sha256: {}", hex::encode(hasher.finalize()));
/// # Ok::<(), tgzkit_core::ArchiveError>(())
/// ```
pub fn archive_buffer<I, W>(data: &[u8], header: Option<&HeaderOverride>, sinks: I) -> Result<u64>
where
    I: IntoIterator<Item = W>,
    W: Write,
{
    let source = ArchiveSource::Buffer { data, header };
    Archiver::new(ArchiveConfig::default()).archive(&source, sinks)
}

/// Archives a file or directory tree.
///
/// A regular file becomes one entry named by its base name. A directory is
/// walked depth-first in file-name order; every subdirectory and regular
/// file becomes an entry named relative to `path`. Non-regular files are
/// skipped, so a path that is itself non-regular yields a valid, empty
/// archive.
///
/// # Errors
///
/// Returns an error if:
/// - `path` does not exist or cannot be accessed (the stat error, unchanged)
/// - the walk fails part way through (already written entries remain in the
///   sinks)
/// - `sinks` is empty or any sink write fails
///
/// # Examples
///
/// ```no_run
/// use std::fs::File;
///
/// let mut out = File::create("site.tgz")?;
/// tgzkit_core::archive_path("public", None, [&mut out])?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn archive_path<P, I, W>(path: P, header: Option<&HeaderOverride>, sinks: I) -> Result<()>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = W>,
    W: Write,
{
    let source = ArchiveSource::from_path(path, header)?;
    Archiver::new(ArchiveConfig::default()).archive(&source, sinks)?;
    Ok(())
}

/// Unpacks a gzip-compressed tar stream below `dest`.
///
/// See [`Extractor`] for per-entry behavior.
///
/// # Errors
///
/// Returns an error if the stream is malformed, an entry name escapes
/// `dest`, or a directory or file cannot be written.
///
/// # Examples
///
/// ```no_run
/// use std::fs::File;
///
/// tgzkit_core::extract("restore", File::open("site.tgz")?)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn extract<P, R>(dest: P, compressed: R) -> Result<()>
where
    P: AsRef<Path>,
    R: Read,
{
    Extractor::new(dest.as_ref()).extract(compressed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ArchiveError;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn test_buffer_roundtrip() {
        let data = b"test file\nline1\nline2\n";
        let mut archive = Vec::new();
        let written = archive_buffer(data, None, [&mut archive]).unwrap();
        assert_eq!(written, data.len() as u64);

        let dest = TempDir::new().unwrap();
        extract(dest.path(), Cursor::new(&archive)).unwrap();

        let entries: Vec<_> = fs::read_dir(dest.path())
            .unwrap()
            .map(|e| e.unwrap())
            .collect();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].file_type().unwrap().is_file());
        assert_eq!(fs::read(entries[0].path()).unwrap(), data);
    }

    #[test]
    fn test_archive_path_missing_source() {
        let temp = TempDir::new().unwrap();
        let mut out = Vec::new();
        let err = archive_path(temp.path().join("missing"), None, [&mut out]).unwrap_err();

        assert!(matches!(&err, ArchiveError::Io(e) if e.kind() == std::io::ErrorKind::NotFound));
        // Stat happens before any stream is opened.
        assert!(out.is_empty());
    }

    #[test]
    fn test_archive_path_directory_roundtrip() {
        let src = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("a/b")).unwrap();
        fs::write(src.path().join("a/b/deep.txt"), "deep").unwrap();
        fs::write(src.path().join("root.txt"), "root").unwrap();

        let mut archive = Vec::new();
        archive_path(src.path(), None, [&mut archive]).unwrap();

        let dest = TempDir::new().unwrap();
        extract(dest.path(), archive.as_slice()).unwrap();
        assert_eq!(fs::read(dest.path().join("a/b/deep.txt")).unwrap(), b"deep");
        assert_eq!(fs::read(dest.path().join("root.txt")).unwrap(), b"root");
    }
}
