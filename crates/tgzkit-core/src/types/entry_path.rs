//! Normalized relative path of an archive entry.

use crate::ArchiveError;
use crate::Result;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// An archive entry name converted into relative platform path components.
///
/// Archive names are forward-slash separated. Normalization drops empty and
/// `.` segments as well as a leading separator, so `"/a//./b"` becomes
/// `a/b` joined with the platform separator. A `..` segment or a platform
/// prefix (such as a Windows drive) is rejected, which keeps every resolved
/// target inside the extraction root.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use tgzkit_core::types::EntryPath;
///
/// let path = EntryPath::parse(Path::new("docs/./guide.txt"))?;
/// assert_eq!(path.as_path(), Path::new("docs").join("guide.txt"));
///
/// assert!(EntryPath::parse(Path::new("../etc/passwd")).is_err());
/// # Ok::<(), tgzkit_core::ArchiveError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryPath(PathBuf);

impl EntryPath {
    /// Normalizes an entry name read from an archive.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::PathTraversal`] if the name contains a `..`
    /// component or a platform prefix.
    pub fn parse(name: &Path) -> Result<Self> {
        let mut normalized = PathBuf::new();

        for component in name.components() {
            match component {
                Component::Normal(segment) => normalized.push(segment),
                Component::CurDir | Component::RootDir => {}
                Component::ParentDir | Component::Prefix(_) => {
                    return Err(ArchiveError::PathTraversal {
                        path: name.to_path_buf(),
                    });
                }
            }
        }

        Ok(Self(normalized))
    }

    /// Returns `true` if the name had no usable segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.as_os_str().is_empty()
    }

    /// Returns the normalized relative path.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins this path onto an extraction root.
    #[must_use]
    pub fn resolve(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_path_plain() {
        let path = EntryPath::parse(Path::new("file.txt")).unwrap();
        assert_eq!(path.as_path(), Path::new("file.txt"));
        assert!(!path.is_empty());
    }

    #[test]
    fn test_entry_path_nested() {
        let path = EntryPath::parse(Path::new("a/b/c.txt")).unwrap();
        let expected: PathBuf = ["a", "b", "c.txt"].iter().collect();
        assert_eq!(path.as_path(), expected);
    }

    #[test]
    fn test_entry_path_normalizes_redundant_segments() {
        let path = EntryPath::parse(Path::new("./a//./b/")).unwrap();
        let expected: PathBuf = ["a", "b"].iter().collect();
        assert_eq!(path.as_path(), expected);
    }

    #[test]
    fn test_entry_path_strips_leading_separator() {
        let path = EntryPath::parse(Path::new("/srv/data.bin")).unwrap();
        let expected: PathBuf = ["srv", "data.bin"].iter().collect();
        assert_eq!(path.as_path(), expected);
    }

    #[test]
    fn test_entry_path_rejects_parent_dir() {
        for name in ["../escape", "a/../../escape", "a/.."] {
            let result = EntryPath::parse(Path::new(name));
            assert!(
                matches!(result, Err(ArchiveError::PathTraversal { .. })),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_entry_path_empty() {
        assert!(EntryPath::parse(Path::new("")).unwrap().is_empty());
        assert!(EntryPath::parse(Path::new("./")).unwrap().is_empty());
        assert!(EntryPath::parse(Path::new("/")).unwrap().is_empty());
    }

    #[test]
    fn test_entry_path_resolve() {
        let root = Path::new("out");
        let path = EntryPath::parse(Path::new("dir/file")).unwrap();
        assert_eq!(path.resolve(root), root.join("dir").join("file"));
    }
}
