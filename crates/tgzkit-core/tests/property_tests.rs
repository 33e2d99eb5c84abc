//! Property-based tests for archive round trips.
//!
//! These tests use proptest to generate arbitrary buffers and small trees
//! and verify that extraction reproduces what was archived.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use proptest::prelude::*;
use sha2::Digest;
use sha2::Sha256;
use std::collections::BTreeMap;
use std::fs;
use std::io::Cursor;
use std::io::Write;
use tempfile::TempDir;
use tgzkit_core::HeaderOverride;
use tgzkit_core::archive_buffer;
use tgzkit_core::archive_path;
use tgzkit_core::copy::CopyBuffer;
use tgzkit_core::copy::copy_with_buffer;
use tgzkit_core::extract;
use tgzkit_core::io::FanOutWriter;

/// Relative file path → content, spread over up to three subdirectories.
fn tree_strategy() -> impl Strategy<Value = BTreeMap<String, Vec<u8>>> {
    let path = (prop::option::of(0u8..3), "f_[a-z0-9]{1,12}").prop_map(|(dir, name)| match dir {
        Some(dir) => format!("d{dir}/{name}"),
        None => name,
    });
    prop::collection::btree_map(path, prop::collection::vec(any::<u8>(), 0..2048), 0..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Any buffer extracts to a single file with identical content.
    #[test]
    fn prop_buffer_roundtrip(
        data in prop::collection::vec(any::<u8>(), 0..16 * 1024),
        name in "[a-zA-Z0-9_-]{1,32}",
    ) {
        let header = HeaderOverride::new().with_name(name.clone());
        let mut archive = Vec::new();
        let written = archive_buffer(&data, Some(&header), [&mut archive]).expect("archive");
        prop_assert_eq!(written, data.len() as u64);

        let dest = TempDir::new().expect("temp dir");
        extract(dest.path(), archive.as_slice()).expect("extract");
        prop_assert_eq!(fs::read(dest.path().join(&name)).expect("read back"), data);
    }

    /// Every regular file of a tree comes back with identical content.
    #[test]
    fn prop_tree_roundtrip(files in tree_strategy()) {
        let src = TempDir::new().expect("temp dir");
        for (path, content) in &files {
            let full = src.path().join(path);
            fs::create_dir_all(full.parent().expect("parent")).expect("mkdir");
            fs::write(full, content).expect("write");
        }

        let mut archive = Vec::new();
        archive_path(src.path(), None, [&mut archive]).expect("archive");

        let dest = TempDir::new().expect("temp dir");
        extract(dest.path(), archive.as_slice()).expect("extract");

        for (path, content) in &files {
            prop_assert_eq!(&fs::read(dest.path().join(path)).expect("read back"), content);
        }
    }

    /// Every fan-out target receives the same bytes.
    #[test]
    fn prop_fanout_targets_agree(
        chunks in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..512), 0..16),
        targets in 1usize..5,
    ) {
        let mut fanout = FanOutWriter::new((0..targets).map(|_| Vec::new())).expect("fanout");
        for chunk in &chunks {
            fanout.write_all(chunk).expect("write");
        }
        let expected: Vec<u8> = chunks.concat();
        for target in fanout.into_inner() {
            prop_assert_eq!(&target, &expected);
        }
    }

    /// A digest sink sees exactly the bytes a buffer sink stores.
    #[test]
    fn prop_digest_sink_matches_stored_bytes(data in prop::collection::vec(any::<u8>(), 0..4096)) {
        let mut stored = Vec::new();
        let mut hasher = Sha256::new();
        let sinks: [&mut dyn Write; 2] = [&mut stored, &mut hasher];
        archive_buffer(&data, None, sinks).expect("archive");

        prop_assert_eq!(hasher.finalize(), Sha256::digest(&stored));
    }

    /// Copying through a reused buffer preserves data for any size.
    #[test]
    fn prop_copy_preserves_data(data in prop::collection::vec(any::<u8>(), 0..200_000)) {
        let mut buffer = CopyBuffer::new();
        let mut output = Vec::new();
        let copied = copy_with_buffer(&mut Cursor::new(&data), &mut output, &mut buffer)
            .expect("copy");
        prop_assert_eq!(copied, data.len() as u64);
        prop_assert_eq!(output, data);
    }
}
