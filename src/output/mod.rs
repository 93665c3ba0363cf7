//! Output sinks for normalized records
//!
//! The TSV writer quotes a field only when it contains a tab, a quote or a
//! line break, writes no header, and keeps the column order of
//! [`NormalizedRecord`].

use crate::error::{NetblockError, Result};
use crate::record::NormalizedRecord;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Destination for records, written in the order they are produced
pub trait RecordSink {
    fn write_record(&mut self, record: &NormalizedRecord) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Collects records in memory
impl RecordSink for Vec<NormalizedRecord> {
    fn write_record(&mut self, record: &NormalizedRecord) -> Result<()> {
        self.push(record.clone());
        Ok(())
    }
}

/// Tab-separated output
pub struct TsvWriter<W: Write> {
    writer: csv::Writer<W>,
    rows: u64,
}

impl TsvWriter<BufWriter<File>> {
    /// Create (or truncate) the output file
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TsvWriter<W> {
    pub fn new(inner: W) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(csv::QuoteStyle::Necessary)
            .has_headers(false)
            .from_writer(inner);
        Self { writer, rows: 0 }
    }

    /// Number of rows written so far
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush and return the underlying writer
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| NetblockError::IoError(e.into_error()))
    }
}

impl<W: Write> RecordSink for TsvWriter<W> {
    fn write_record(&mut self, record: &NormalizedRecord) -> Result<()> {
        self.writer.serialize(record)?;
        self.rows += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
