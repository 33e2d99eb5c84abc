//! Configuration for archive creation.

use crate::ArchiveError;
use crate::Result;

/// Configuration for archive creation operations.
///
/// Per-entry metadata is controlled separately through
/// [`HeaderOverride`](crate::creation::HeaderOverride); this struct holds the
/// settings that apply to the stream as a whole.
///
/// # Examples
///
/// ```
/// use tgzkit_core::ArchiveConfig;
///
/// let config = ArchiveConfig::default();
/// assert_eq!(config.compression_level, Some(6));
///
/// let fast = ArchiveConfig::default().with_compression_level(1);
/// assert!(fast.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Gzip compression level (1-9).
    ///
    /// `None` uses the codec default.
    ///
    /// Default: `Some(6)` (balanced).
    pub compression_level: Option<u8>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            compression_level: Some(6),
        }
    }
}

impl ArchiveConfig {
    /// Creates a new `ArchiveConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression level.
    ///
    /// # Panics
    ///
    /// Panics if the compression level is not in the range 1-9.
    /// Use `validate()` for non-panicking validation.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        assert!((1..=9).contains(&level), "compression level must be 1-9");
        self.compression_level = Some(level);
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the compression level is set but not in range 1-9.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && !(1..=9).contains(&level)
        {
            return Err(ArchiveError::InvalidCompressionLevel { level });
        }
        Ok(())
    }

    /// Returns the `flate2` compression setting for this configuration.
    pub(crate) fn compression(&self) -> flate2::Compression {
        self.compression_level
            .map_or_else(flate2::Compression::default, |level| {
                flate2::Compression::new(u32::from(level))
            })
    }
}
