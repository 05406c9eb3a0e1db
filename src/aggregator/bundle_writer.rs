use crate::aggregator::record::FileRecord;
use crate::error::{AggregateError, Result};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const BUFFER_SIZE: usize = 64 * 1024;

/// Sequential sink for records. Owns the output handle for the whole run.
pub struct BundleWriter<W: Write> {
    inner: W,
}

impl BundleWriter<BufWriter<fs::File>> {
    /// Creates or truncates `path`.
    pub fn create(path: &Path) -> Result<Self> {
        let file = fs::File::create(path).map_err(|e| AggregateError::OutputFile {
            path: path.display().to_string(),
            source: e,
        })?;

        Ok(Self::new(BufWriter::with_capacity(BUFFER_SIZE, file)))
    }
}

impl<W: Write> BundleWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Writes the delimiter line, the content, then a blank separator line.
    /// Returns the number of bytes of content written.
    pub fn write_record(&mut self, record: &FileRecord) -> io::Result<u64> {
        let body = record.content.rendered();

        writeln!(self.inner, "{}", record.delimiter())?;
        self.inner.write_all(body.as_bytes())?;
        self.inner.write_all(b"\n\n")?;

        Ok(body.len() as u64)
    }

    /// Flushes and hands back the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}
