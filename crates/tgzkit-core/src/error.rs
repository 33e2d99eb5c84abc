//! Error types for archive creation and extraction.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while building or unpacking an archive stream.
///
/// I/O failures from sources, sinks and the codecs are passed through
/// unchanged in [`ArchiveError::Io`] so callers can inspect the original
/// [`std::io::ErrorKind`].
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal failed part way through a walk.
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// An archive operation was started without any sink to write to.
    #[error("at least one sink is required")]
    NoSinks,

    /// A name cannot be stored as an archive entry name: a walked path that
    /// is not valid UTF-8, or a buffer name that is not a non-empty relative
    /// path without `..`.
    #[error("invalid entry name: {path}")]
    InvalidEntryName {
        /// The offending path or name.
        path: PathBuf,
    },

    /// An archive entry name would resolve outside the extraction root.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The entry name as stored in the archive.
        path: PathBuf,
    },

    /// A source produced fewer bytes than its header declared.
    #[error("size mismatch for {name}: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        /// Entry name.
        name: String,
        /// Size recorded in the entry header.
        expected: u64,
        /// Bytes actually read from the source.
        actual: u64,
    },

    /// Compression level outside the supported 1-9 range.
    #[error("invalid compression level {level}: must be 1-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },
}

impl ArchiveError {
    /// Returns `true` if this error wraps an I/O error, either directly or
    /// through a failed directory walk.
    ///
    /// # Examples
    ///
    /// ```
    /// use tgzkit_core::ArchiveError;
    ///
    /// let err = ArchiveError::Io(std::io::Error::other("disk full"));
    /// assert!(err.is_io());
    ///
    /// assert!(!ArchiveError::NoSinks.is_io());
    /// ```
    #[must_use]
    pub fn is_io(&self) -> bool {
        self.io_error().is_some()
    }

    /// Returns the underlying I/O error, if any.
    ///
    /// Walk errors caused by a filesystem failure expose the same
    /// `std::io::Error` that the traversal encountered.
    #[must_use]
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            Self::Io(err) => Some(err),
            Self::Walk(err) => err.io_error(),
            _ => None,
        }
    }
}
