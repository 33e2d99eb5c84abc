//! Test helpers for building and inspecting gzip-compressed tar streams.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use std::io::Read;
use std::io::Write;

/// Gzip-compresses `data` as a single member.
pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// One entry read back from an archive.
#[derive(Debug, Clone)]
pub struct TestEntry {
    pub path: String,
    pub kind: tar::EntryType,
    pub mode: u32,
    pub mtime: u64,
    pub username: Option<String>,
    pub groupname: Option<String>,
    pub data: Vec<u8>,
}

/// Decodes every entry of a gzip-compressed tar stream, in stream order.
pub fn read_tgz_entries(archive: &[u8]) -> Vec<TestEntry> {
    let mut archive = tar::Archive::new(GzDecoder::new(archive));
    let mut entries = Vec::new();

    for entry in archive.entries().unwrap() {
        let mut entry = entry.unwrap();
        let header = entry.header().clone();
        let path = entry.path().unwrap().to_string_lossy().into_owned();
        let mut data = Vec::new();
        entry.read_to_end(&mut data).unwrap();

        entries.push(TestEntry {
            path,
            kind: header.entry_type(),
            mode: header.mode().unwrap(),
            mtime: header.mtime().unwrap(),
            username: header.username().unwrap().map(str::to_string),
            groupname: header.groupname().unwrap().map(str::to_string),
            data,
        });
    }

    entries
}

/// Builder for gzip-compressed tar test streams, including malformed ones.
pub struct TgzTestBuilder {
    builder: tar::Builder<Vec<u8>>,
}

impl TgzTestBuilder {
    pub fn new() -> Self {
        Self {
            builder: tar::Builder::new(Vec::new()),
        }
    }

    /// Adds a regular file with mode 0o644.
    pub fn add_file(self, path: &str, data: &[u8]) -> Self {
        self.add_file_with_mode(path, data, 0o644)
    }

    /// Adds a regular file with custom mode.
    pub fn add_file_with_mode(mut self, path: &str, data: &[u8], mode: u32) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(mode);
        header.set_cksum();
        self.builder.append_data(&mut header, path, data).unwrap();
        self
    }

    /// Adds a regular file whose name bytes are stored verbatim, bypassing
    /// the `tar` crate's path checks.
    pub fn add_file_raw_name(mut self, name: &str, data: &[u8]) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_entry_type(tar::EntryType::Regular);
        header.as_old_mut().name[..name.len()].copy_from_slice(name.as_bytes());
        header.set_cksum();
        self.builder.append(&header, data).unwrap();
        self
    }

    /// Adds a directory.
    pub fn add_directory(mut self, path: &str, mode: u32) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(mode);
        header.set_entry_type(tar::EntryType::Directory);
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Adds a symlink.
    pub fn add_symlink(mut self, path: &str, target: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o777);
        header.set_entry_type(tar::EntryType::Symlink);
        header.set_link_name(target).unwrap();
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Appends a single all-zero header block in the middle of the stream.
    pub fn add_zero_block(mut self) -> Self {
        self.builder.get_mut().extend_from_slice(&[0u8; 512]);
        self
    }

    /// Finishes the tar stream and gzip-compresses it.
    pub fn build(self) -> Vec<u8> {
        gzip(&self.builder.into_inner().unwrap())
    }
}

impl Default for TgzTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
