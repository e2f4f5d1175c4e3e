//! VCF stream writing
//!
//! Replays the header (original meta lines plus any fields declared through
//! `add_info`) and then formats records. Declaration-before-write is the
//! contract: a command mutates its header clone first, then constructs the
//! writer.

use std::io::Write;

use crate::error::TriageError;

use super::header::VcfHeader;
use super::record::VcfRecord;

/// VCF writer over any `Write`
pub struct VcfWriter<W: Write> {
    inner: W,
}

impl<W: Write> VcfWriter<W> {
    /// Create a writer, emitting the full header immediately
    pub fn new(mut inner: W, header: &VcfHeader) -> Result<Self, TriageError> {
        for line in header.lines() {
            writeln!(inner, "{}", line)?;
        }
        writeln!(inner, "{}", header.column_line())?;
        Ok(Self { inner })
    }

    /// Write one record
    pub fn write_record(&mut self, record: &VcfRecord) -> Result<(), TriageError> {
        writeln!(self.inner, "{}", record)?;
        Ok(())
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<(), TriageError> {
        self.inner.flush()?;
        Ok(())
    }
}
