//! Archive extraction.

pub mod extractor;

pub use extractor::Extractor;
