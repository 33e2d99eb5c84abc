//! I/O adapters used by the stream pipeline.
//!
//! [`FanOutWriter`] duplicates every write across several sinks so an archive
//! can be persisted and digested in a single pass. [`CountingReader`] tracks
//! how many content bytes were pulled from an entry source.

pub mod counting;
pub mod fanout;

pub use counting::CountingReader;
pub use fanout::FanOutWriter;
