//! Per-entry header metadata and the policy that resolves it.
//!
//! Every entry written to an archive gets an [`EntryHeader`] built by
//! [`HeaderPolicy`] from computed defaults and an optional caller-supplied
//! [`HeaderOverride`]. Defaults depend on the source variant:
//!
//! | Field    | Buffer / single file            | Directory walk                  |
//! |----------|---------------------------------|---------------------------------|
//! | name     | UTC `YYYYMMDDTHHMMSS` / base name | path relative to the walk root |
//! | owner    | `"user"`                        | `"user"`                        |
//! | group    | `"user"`                        | `"user"`                        |
//! | mode     | `0644`                          | `0644` (`0755` for directories) |
//! | mtime    | now, rounded to the second      | walked file's mtime             |
//!
//! Override fields that are `Some` replace the default for every entry of the
//! operation.

use chrono::DateTime;
use chrono::Utc;
use std::fs::Metadata;
use std::path::Component;
use std::path::Path;
use std::time::UNIX_EPOCH;

use crate::ArchiveError;
use crate::Result;
use crate::types::EntryKind;

/// Owner and group name used when the caller supplies none.
pub const DEFAULT_OWNER: &str = "user";

/// Permission bits used when the caller supplies none.
pub const DEFAULT_MODE: u32 = 0o644;

/// Layout of the name generated for buffer entries.
const TIMESTAMP_NAME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Caller-supplied metadata that replaces specific header defaults.
///
/// # Examples
///
/// ```
/// use chrono::TimeZone;
/// use chrono::Utc;
/// use tgzkit_core::creation::HeaderOverride;
///
/// let header = HeaderOverride::new()
///     .with_name("report.txt")
///     .with_owner("build")
///     .with_mode(0o600)
///     .with_modified(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
/// assert_eq!(header.mode, Some(0o600));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderOverride {
    /// Entry name. Only used for buffer entries.
    pub name: Option<String>,

    /// Owner user name.
    pub owner: Option<String>,

    /// Owner group name.
    pub group: Option<String>,

    /// Permission bits.
    pub mode: Option<u32>,

    /// Modification time. In a directory walk this also sets the access and
    /// change times of every entry.
    pub modified: Option<DateTime<Utc>>,
}

impl HeaderOverride {
    /// Creates an override that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the entry name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the owner user name.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    /// Sets the owner group name.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Sets the permission bits.
    #[must_use]
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Sets the modification time.
    #[must_use]
    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }
}

/// Effective metadata for one archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryHeader {
    /// Archive-relative name, forward-slash separated.
    pub name: String,

    /// Content size in bytes (0 for directories).
    pub size: u64,

    /// Owner user name.
    pub owner: String,

    /// Owner group name.
    pub group: String,

    /// Permission bits.
    pub mode: u32,

    /// Modification time in seconds since the Unix epoch.
    pub modified: Option<u64>,

    /// Access time in seconds since the Unix epoch.
    pub accessed: Option<u64>,

    /// Change time in seconds since the Unix epoch.
    pub changed: Option<u64>,

    /// Entry kind.
    pub kind: EntryKind,
}

impl EntryHeader {
    /// Builds the tar header record for this entry.
    ///
    /// The path is not set here; [`tar::Builder::append_data`] writes it,
    /// including GNU long-name records for names over 100 bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the owner or group name does not fit the 32-byte
    /// header fields.
    pub fn to_tar_header(&self) -> Result<tar::Header> {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(self.kind.to_tar());
        header.set_size(self.size);
        header.set_mode(self.mode);
        header.set_uid(0);
        header.set_gid(0);
        header.set_username(&self.owner)?;
        header.set_groupname(&self.group)?;
        header.set_mtime(self.modified.unwrap_or(0));

        if let Some(gnu) = header.as_gnu_mut() {
            if let Some(accessed) = self.accessed {
                gnu.set_atime(accessed);
            }
            if let Some(changed) = self.changed {
                gnu.set_ctime(changed);
            }
        }

        Ok(header)
    }
}

/// Resolves effective entry headers for one archive operation.
///
/// The policy captures "now" once at construction so a buffer entry's
/// generated name and modification time agree.
#[derive(Debug, Clone)]
pub struct HeaderPolicy<'a> {
    overrides: Option<&'a HeaderOverride>,
    now: DateTime<Utc>,
}

impl<'a> HeaderPolicy<'a> {
    /// Creates a policy using the current UTC time for defaults.
    #[must_use]
    pub fn new(overrides: Option<&'a HeaderOverride>) -> Self {
        Self::at(overrides, Utc::now())
    }

    /// Creates a policy with an explicit "now".
    #[must_use]
    pub fn at(overrides: Option<&'a HeaderOverride>, now: DateTime<Utc>) -> Self {
        Self { overrides, now }
    }

    /// Header for a buffer entry of `size` bytes.
    ///
    /// The name comes from the override or, by default, from the policy's
    /// timestamp.
    #[must_use]
    pub fn resolve_buffer(&self, size: u64) -> EntryHeader {
        let name = self
            .overrides
            .and_then(|o| o.name.clone())
            .unwrap_or_else(|| self.now.format(TIMESTAMP_NAME_FORMAT).to_string());
        self.single_entry(name, size)
    }

    /// Header for a single archived file. The name is always the file's base
    /// name.
    #[must_use]
    pub fn resolve_file(&self, base_name: String, size: u64) -> EntryHeader {
        self.single_entry(base_name, size)
    }

    /// Header for a file or subdirectory found during a directory walk.
    ///
    /// `name` is the walk-relative name. Size comes from `metadata` for
    /// regular files and is 0 for directories.
    #[must_use]
    pub fn resolve_walked(&self, name: String, kind: EntryKind, metadata: &Metadata) -> EntryHeader {
        let file_mode = self.mode();
        let (size, mode) = match kind {
            EntryKind::Regular => (metadata.len(), file_mode),
            EntryKind::Directory => (0, directory_mode(file_mode)),
        };

        let (modified, accessed, changed) = match self.overrides.and_then(|o| o.modified) {
            Some(modified) => {
                let secs = epoch_seconds(&modified);
                (Some(secs), Some(secs), Some(secs))
            }
            None => (modified_seconds(metadata), None, None),
        };

        EntryHeader {
            name,
            size,
            owner: self.owner(),
            group: self.group(),
            mode,
            modified,
            accessed,
            changed,
            kind,
        }
    }

    fn single_entry(&self, name: String, size: u64) -> EntryHeader {
        let modified = self
            .overrides
            .and_then(|o| o.modified)
            .map_or_else(|| rounded_seconds(&self.now), |m| epoch_seconds(&m));

        EntryHeader {
            name,
            size,
            owner: self.owner(),
            group: self.group(),
            mode: self.mode(),
            modified: Some(modified),
            accessed: None,
            changed: None,
            kind: EntryKind::Regular,
        }
    }

    fn owner(&self) -> String {
        self.overrides
            .and_then(|o| o.owner.clone())
            .unwrap_or_else(|| DEFAULT_OWNER.to_string())
    }

    fn group(&self) -> String {
        self.overrides
            .and_then(|o| o.group.clone())
            .unwrap_or_else(|| DEFAULT_OWNER.to_string())
    }

    fn mode(&self) -> u32 {
        self.overrides.and_then(|o| o.mode).unwrap_or(DEFAULT_MODE)
    }
}

/// Checks that `name` can be written as an archive entry name.
///
/// The name must contain at least one normal segment and no root, drive
/// prefix, `..` segment or NUL byte. `.` segments are allowed.
///
/// # Errors
///
/// Returns [`ArchiveError::InvalidEntryName`] otherwise.
///
/// # Examples
///
/// ```
/// use tgzkit_core::creation::header::validate_entry_name;
///
/// assert!(validate_entry_name("logs/today.txt").is_ok());
/// assert!(validate_entry_name("../today.txt").is_err());
/// ```
pub fn validate_entry_name(name: &str) -> Result<()> {
    let path = Path::new(name);
    let mut segments = 0usize;

    for component in path.components() {
        match component {
            Component::Normal(_) => segments += 1,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                segments = 0;
                break;
            }
        }
    }

    if segments == 0 || name.contains('\0') {
        return Err(ArchiveError::InvalidEntryName {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Returns `true` if the entry may be archived as a regular file.
///
/// Symlinks, devices, FIFOs, sockets and files carrying setuid, setgid or
/// sticky bits are rejected.
#[cfg(unix)]
#[must_use]
pub fn is_archivable(metadata: &Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.file_type().is_file() && metadata.permissions().mode() & 0o7000 == 0
}

/// Returns `true` if the entry may be archived as a regular file.
#[cfg(not(unix))]
#[must_use]
pub fn is_archivable(metadata: &Metadata) -> bool {
    metadata.file_type().is_file()
}

/// Mode for directory entries: every read bit of `file_mode` gains the
/// matching execute bit, so `0644` becomes `0755`.
#[must_use]
pub const fn directory_mode(file_mode: u32) -> u32 {
    file_mode | ((file_mode & 0o444) >> 2)
}

// Pre-epoch times clamp to 0.
fn epoch_seconds(time: &DateTime<Utc>) -> u64 {
    u64::try_from(time.timestamp()).unwrap_or(0)
}

fn rounded_seconds(time: &DateTime<Utc>) -> u64 {
    let secs = epoch_seconds(time);
    if time.timestamp_subsec_nanos() >= 500_000_000 {
        secs + 1
    } else {
        secs
    }
}

fn modified_seconds(metadata: &Metadata) -> Option<u64> {
    metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
}
