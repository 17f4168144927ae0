use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::row::RejectedRow;
use crate::errors::{IngestError, IngestResult};

/// Rejected rows of the current ingestion. Creating it truncates the
/// previous run's file.
pub struct RejectionLog {
    path: PathBuf,
    writer: BufWriter<File>,
    entries: usize,
}

impl RejectionLog {
    pub fn create(path: &Path) -> IngestResult<Self> {
        let file = File::create(path).map_err(|e| IngestError::io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
            entries: 0,
        })
    }

    pub fn record(&mut self, rejected: &RejectedRow) -> IngestResult<()> {
        log::warn!("Rejected CSV {}", rejected.log_line());
        writeln!(self.writer, "{}", rejected.log_line())
            .map_err(|e| IngestError::io(&self.path, e))?;
        self.entries += 1;
        Ok(())
    }

    pub fn finish(mut self) -> IngestResult<usize> {
        self.writer
            .flush()
            .map_err(|e| IngestError::io(&self.path, e))?;
        Ok(self.entries)
    }
}
