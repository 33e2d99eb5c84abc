//! What an archive operation packages.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::creation::header::HeaderOverride;

/// Source of an archive operation.
///
/// Each variant selects its own header defaults, see
/// [`HeaderPolicy`](crate::creation::HeaderPolicy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveSource<'a> {
    /// One synthetic entry whose content is `data`.
    Buffer {
        /// Entry content.
        data: &'a [u8],
        /// Optional metadata override.
        header: Option<&'a HeaderOverride>,
    },

    /// One entry holding the contents of a single file.
    SingleFile {
        /// File to archive.
        path: PathBuf,
        /// Optional metadata override.
        header: Option<&'a HeaderOverride>,
    },

    /// Every subdirectory and regular file below `root`.
    DirectoryTree {
        /// Walk root. Not itself archived.
        root: PathBuf,
        /// Optional metadata override.
        header: Option<&'a HeaderOverride>,
    },
}

impl<'a> ArchiveSource<'a> {
    /// Picks `SingleFile` or `DirectoryTree` by inspecting `path`.
    ///
    /// Symlinks at `path` itself are followed.
    ///
    /// # Errors
    ///
    /// Returns the stat error unchanged if `path` does not exist or cannot be
    /// accessed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use tgzkit_core::creation::ArchiveSource;
    ///
    /// let source = ArchiveSource::from_path("assets", None)?;
    /// assert!(matches!(source, ArchiveSource::DirectoryTree { .. }));
    /// # Ok::<(), tgzkit_core::ArchiveError>(())
    /// ```
    pub fn from_path<P: AsRef<Path>>(path: P, header: Option<&'a HeaderOverride>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = fs::metadata(path)?;

        if metadata.is_dir() {
            Ok(Self::DirectoryTree {
                root: path.to_path_buf(),
                header,
            })
        } else {
            Ok(Self::SingleFile {
                path: path.to_path_buf(),
                header,
            })
        }
    }

    /// Returns the caller's header override, if any.
    #[must_use]
    pub fn header(&self) -> Option<&'a HeaderOverride> {
        match self {
            Self::Buffer { header, .. }
            | Self::SingleFile { header, .. }
            | Self::DirectoryTree { header, .. } => *header,
        }
    }
}
