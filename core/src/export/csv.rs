use super::{headers, rows};
use crate::error::Result;
use crate::types::{DoseReport, ReportKind};
use log::debug;
use std::io::Write;

/// Writes reports of one kind as CSV rows of its column schema
#[derive(Debug, Clone)]
pub struct CsvExporter {
    placeholder: String,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new("-")
    }
}

impl CsvExporter {
    /// Creates an exporter rendering missing cells as `placeholder`
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
        }
    }

    /// Writes the header and the rows of every report of `kind`
    ///
    /// Reports of other kinds are skipped. Returns the number of data rows.
    pub fn write<'r, W, I>(&self, writer: W, kind: ReportKind, reports: I) -> Result<usize>
    where
        W: Write,
        I: IntoIterator<Item = &'r DoseReport>,
    {
        let mut out = ::csv::Writer::from_writer(writer);
        out.write_record(headers(kind))?;

        let mut count = 0;
        for report in reports.into_iter().filter(|r| r.kind == kind) {
            for row in rows(report) {
                out.write_record(row.iter().map(|cell| cell.render(&self.placeholder)))?;
                count += 1;
            }
        }
        out.flush()?;

        debug!("Wrote {} {} rows", count, kind);
        Ok(count)
    }
}
