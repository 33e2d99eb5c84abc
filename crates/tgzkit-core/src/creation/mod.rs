//! Archive creation.
//!
//! [`Archiver`] turns an [`ArchiveSource`] into a gzip-compressed tar stream
//! written through a [`StreamPipeline`] into one or more sinks. Entry
//! metadata comes from [`HeaderPolicy`]; directory sources are enumerated by
//! [`TreeWalker`].

pub mod archiver;
pub mod header;
pub mod pipeline;
pub mod source;
pub mod walker;

// Re-exports for public API
pub use archiver::Archiver;
pub use header::EntryHeader;
pub use header::HeaderOverride;
pub use header::HeaderPolicy;
pub use pipeline::StreamPipeline;
pub use source::ArchiveSource;
pub use walker::TreeWalker;
pub use walker::WalkedEntry;
