//! Writer that duplicates every write to a fixed set of destinations.

use std::io::Write;

use crate::ArchiveError;
use crate::Result;

/// A single write surface backed by one or more destinations.
///
/// Each call to [`write`](Write::write) writes the whole buffer to every
/// destination in order before returning. The first destination that fails
/// aborts the call with its error; destinations earlier in the list keep
/// what they already received.
///
/// Any `Write` works as a destination, including hash accumulators such as
/// `sha2::Sha256`, so an archive can be stored and digested without reading
/// it back.
///
/// # Examples
///
/// ```
/// use std::io::Write;
/// use tgzkit_core::io::FanOutWriter;
///
/// let mut first = Vec::new();
/// let mut second = Vec::new();
/// {
///     let mut writer = FanOutWriter::new([&mut first, &mut second])?;
///     writer.write_all(b"same bytes")?;
/// }
/// assert_eq!(first, second);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct FanOutWriter<W> {
    targets: Vec<W>,
}

impl<W: Write> FanOutWriter<W> {
    /// Creates a fan-out writer over the given destinations.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::NoSinks`] if `targets` is empty.
    pub fn new<I>(targets: I) -> Result<Self>
    where
        I: IntoIterator<Item = W>,
    {
        let targets: Vec<W> = targets.into_iter().collect();
        if targets.is_empty() {
            return Err(ArchiveError::NoSinks);
        }
        Ok(Self { targets })
    }

    /// Number of destinations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Always `false`; construction rejects an empty target set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Consumes the writer and returns the destinations in their original
    /// order.
    #[must_use]
    pub fn into_inner(self) -> Vec<W> {
        self.targets
    }
}

impl<W: Write> Write for FanOutWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        for target in &mut self.targets {
            target.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        for target in &mut self.targets {
            target.flush()?;
        }
        Ok(())
    }
}
