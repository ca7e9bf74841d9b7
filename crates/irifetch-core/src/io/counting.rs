//! Writer that counts bytes and forwards them to a progress callback.

use std::io::Write;

use crate::report::FetchProgress;

/// Wrapper writer that tracks total bytes written and reports each
/// successful write to a [`FetchProgress`].
///
/// The counter only increments on successful writes.
///
/// # Examples
///
/// ```
/// use irifetch_core::NoopProgress;
/// use irifetch_core::io::CountingWriter;
/// use std::io::Write;
///
/// let mut buffer = Vec::new();
/// let mut progress = NoopProgress;
/// let mut writer = CountingWriter::new(&mut buffer, &mut progress);
///
/// writer.write_all(b"ig_rz.dat")?;
/// assert_eq!(writer.total_bytes(), 9);
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct CountingWriter<'a, W> {
    inner: W,
    bytes_written: u64,
    progress: &'a mut dyn FetchProgress,
}

impl<'a, W> CountingWriter<'a, W> {
    /// Creates a new counting writer.
    pub fn new(inner: W, progress: &'a mut dyn FetchProgress) -> Self {
        Self {
            inner,
            bytes_written: 0,
            progress,
        }
    }

    /// Returns the total number of bytes successfully written.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.bytes_written
    }

    /// Returns a reference to the inner writer.
    #[must_use]
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Consumes the counting writer and returns the inner writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let bytes = self.inner.write(buf)?;
        self.bytes_written += bytes as u64;
        self.progress.on_bytes(bytes as u64);
        Ok(bytes)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
