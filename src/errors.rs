use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort an ingestion. Malformed rows are not errors; they are
/// skipped and recorded in the rejected rows log.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Row {row} is not valid UTF-8")]
    Decode { row: usize },

    #[error("Failed to read CSV input: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl IngestError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type IngestResult<T> = Result<T, IngestError>;
