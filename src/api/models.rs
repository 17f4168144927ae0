use serde::{Deserialize, Serialize};

use crate::services::IngestionReport;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub message: String,
    pub accepted: usize,
    pub rejected: usize,
}

impl From<&IngestionReport> for UploadResponse {
    fn from(report: &IngestionReport) -> Self {
        Self {
            message: "File processed and ranking updated successfully.".to_string(),
            accepted: report.accepted,
            rejected: report.rejected.len(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
    /// Snapshot timestamp, `YYYY-MM-DD HH:MM:SS`
    pub data: Option<String>,
}
