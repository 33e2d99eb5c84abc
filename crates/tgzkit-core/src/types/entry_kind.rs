//! Archive entry kind enumeration.

/// Kind of an archive entry.
///
/// Only regular files and directories are written or extracted. Every other
/// tar entry type (symlinks, hard links, devices, FIFOs) maps to `None` in
/// [`EntryKind::from_tar`] and is skipped by policy.
///
/// # Examples
///
/// ```
/// use tgzkit_core::types::EntryKind;
///
/// assert_eq!(EntryKind::from_tar(tar::EntryType::Regular), Some(EntryKind::Regular));
/// assert_eq!(EntryKind::from_tar(tar::EntryType::Symlink), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Regular file entry.
    Regular,

    /// Directory entry.
    Directory,
}

impl EntryKind {
    /// Maps a tar entry type onto a supported kind.
    ///
    /// Contiguous files are treated as regular files; old-style headers with
    /// a NUL type flag are already reported as `Regular` by the `tar` crate.
    #[must_use]
    pub fn from_tar(entry_type: tar::EntryType) -> Option<Self> {
        match entry_type {
            tar::EntryType::Regular | tar::EntryType::Continuous => Some(Self::Regular),
            tar::EntryType::Directory => Some(Self::Directory),
            _ => None,
        }
    }

    /// Returns the tar entry type written for this kind.
    #[must_use]
    pub const fn to_tar(self) -> tar::EntryType {
        match self {
            Self::Regular => tar::EntryType::Regular,
            Self::Directory => tar::EntryType::Directory,
        }
    }
}
