use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use log::info;

use crate::transaction::Transaction;

pub(crate) trait RecordSink {
    /// Append rows to the tabular store, returning the number of rows
    /// actually written. Rows already present in the store (by count) are
    /// assumed to be earlier writes of the same batch prefix and are skipped.
    fn append_rows(&mut self, rows: &[Transaction]) -> anyhow::Result<usize>;
}

/// Record sink backed by a csv file. The first row of a non-empty sheet is
/// the header row.
pub(crate) struct CsvSink {
    file_path: PathBuf,
}

impl CsvSink {
    pub(crate) fn new(file_path: &Path) -> CsvSink {
        CsvSink { file_path: file_path.to_path_buf() }
    }

    /// Number of data rows already in the sheet, None when the sheet has no
    /// header row yet.
    fn existing_row_count(&self) -> anyhow::Result<Option<usize>> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let mut rdr = ReaderBuilder::new().has_headers(false).from_path(&self.file_path)?;
        let mut total = 0usize;
        for record in rdr.records() {
            record?;
            total += 1;
        }

        if total == 0 {
            return Ok(None);
        }
        // The header row occupies the first row
        Ok(Some(total - 1))
    }
}

impl RecordSink for CsvSink {
    fn append_rows(&mut self, rows: &[Transaction]) -> anyhow::Result<usize> {
        let existing = self.existing_row_count()?;
        let already_written = existing.unwrap_or(0);
        if rows.len() <= already_written {
            info!("Sheet already holds {} rows, nothing new to append", already_written);
            return Ok(0);
        }

        let file = OpenOptions::new().create(true).append(true).open(&self.file_path)?;
        let mut writer = WriterBuilder::new().has_headers(existing.is_none()).from_writer(file);
        for row in &rows[already_written..] {
            writer.serialize(row)?;
        }
        writer.flush()?;

        Ok(rows.len() - already_written)
    }
}
