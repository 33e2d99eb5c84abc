//! Build and unpack gzip-compressed tar streams.
//!
//! `tgzkit-core` packages a byte buffer, a single file, or a directory tree
//! into a `.tar.gz` stream and unpacks such streams into a directory tree.
//! Archive bytes can be fanned out to several sinks at once, for example a
//! file and a running SHA-256, so the archive is stored and digested in a
//! single pass.
//!
//! Only regular files and directories are archived or extracted; every other
//! entry kind is skipped by policy.
//!
//! # Examples
//!
//! ```no_run
//! use sha2::Digest;
//! use std::fs::File;
//! use std::io::Write;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut file = File::create("assets.tgz")?;
//! let mut hasher = sha2::Sha256::new();
//! let sinks: [&mut dyn Write; 2] = [&mut file, &mut hasher];
//! tgzkit_core::archive_path("assets", None, sinks)?;
//! println!("sha256: {}", hex::encode(hasher.finalize()));
//!
//! tgzkit_core::extract("restored", File::open("assets.tgz")?)?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod copy;
pub mod creation;
pub mod error;
pub mod extraction;
pub mod io;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export main API types
pub use api::archive_buffer;
pub use api::archive_path;
pub use api::extract;
pub use config::ArchiveConfig;
pub use creation::ArchiveSource;
pub use creation::Archiver;
pub use creation::HeaderOverride;
pub use error::ArchiveError;
pub use error::Result;
pub use extraction::Extractor;
