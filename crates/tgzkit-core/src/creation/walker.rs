//! Deterministic directory tree walking.
//!
//! The walker yields every subdirectory and archivable regular file below a
//! root, depth-first, with siblings sorted by file name so the same tree
//! always produces the same entry sequence. The root itself is not yielded.

use std::fs::Metadata;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use tracing::trace;
use walkdir::WalkDir;

use crate::ArchiveError;
use crate::Result;
use crate::creation::header::is_archivable;
use crate::types::EntryKind;

/// Walks a directory tree, yielding archivable entries.
///
/// Symlinks below the root are never followed and never yielded, as are
/// devices, FIFOs, sockets and files with setuid, setgid or sticky bits.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use tgzkit_core::creation::TreeWalker;
///
/// let walker = TreeWalker::new(Path::new("./project"));
/// for entry in walker.walk() {
///     let entry = entry?;
///     println!("{:?} {}", entry.kind, entry.name);
/// }
/// # Ok::<(), tgzkit_core::ArchiveError>(())
/// ```
pub struct TreeWalker<'a> {
    root: &'a Path,
}

impl<'a> TreeWalker<'a> {
    /// Creates a walker rooted at `root`.
    #[must_use]
    pub fn new(root: &'a Path) -> Self {
        Self { root }
    }

    /// Returns an iterator over archivable entries in walk order.
    ///
    /// Directories are yielded before their contents.
    ///
    /// # Errors
    ///
    /// Items are errors when a directory cannot be read, metadata cannot be
    /// fetched, or a name is not valid UTF-8. Callers stop at the first
    /// error.
    pub fn walk(&self) -> impl Iterator<Item = Result<WalkedEntry>> + '_ {
        WalkDir::new(self.root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => self.classify(&entry).transpose(),
                Err(e) => Some(Err(ArchiveError::Walk(e))),
            })
    }

    fn classify(&self, entry: &walkdir::DirEntry) -> Result<Option<WalkedEntry>> {
        let metadata = entry.metadata()?;

        let kind = if metadata.is_dir() {
            EntryKind::Directory
        } else if is_archivable(&metadata) {
            EntryKind::Regular
        } else {
            trace!(path = %entry.path().display(), "skipping non-regular file");
            return Ok(None);
        };

        let name = archive_name(entry.path(), self.root)?;

        Ok(Some(WalkedEntry {
            path: entry.path().to_path_buf(),
            name,
            kind,
            metadata,
        }))
    }
}

/// A directory or regular file found by [`TreeWalker`].
#[derive(Debug, Clone)]
pub struct WalkedEntry {
    /// Full filesystem path.
    pub path: PathBuf,

    /// Archive name: path relative to the walk root, `/`-separated.
    pub name: String,

    /// Entry kind.
    pub kind: EntryKind,

    /// Metadata captured during the walk (symlinks not followed).
    pub metadata: Metadata,
}

/// Computes the archive name of `path` relative to `root`.
///
/// The root prefix and any leading separator are removed and the remaining
/// components are joined with `/` regardless of platform.
///
/// # Errors
///
/// Returns [`ArchiveError::InvalidEntryName`] if a component is not valid
/// UTF-8 or `path` is not below `root`.
pub fn archive_name(path: &Path, root: &Path) -> Result<String> {
    let invalid = || ArchiveError::InvalidEntryName {
        path: path.to_path_buf(),
    };
    let relative = path.strip_prefix(root).map_err(|_| invalid())?;

    let mut parts = Vec::new();
    for component in relative.components() {
        if let Component::Normal(segment) = component {
            parts.push(segment.to_str().ok_or_else(invalid)?);
        }
    }

    Ok(parts.join("/"))
}
