//! Shared types for archive entries.
//!
//! - [`EntryKind`]: the two entry kinds this crate produces and materializes
//! - [`EntryPath`]: an archive entry name normalized into relative platform
//!   path components

pub mod entry_kind;
pub mod entry_path;

pub use entry_kind::EntryKind;
pub use entry_path::EntryPath;
