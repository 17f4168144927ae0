use csv::StringRecord;
use thiserror::Error;

pub const EXPECTED_COLUMNS: usize = 3;

/// A data row that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRow {
    pub name: String,
    pub level: i64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowRejection {
    #[error("expected 3 columns, found {0}")]
    ColumnCount(usize),
    #[error("level is not an integer")]
    InvalidLevel,
    #[error("score is not a finite number")]
    InvalidScore,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    /// 1-based, counting data rows only
    pub row: usize,
    pub raw: String,
    pub reason: RowRejection,
}

impl RejectedRow {
    pub fn log_line(&self) -> String {
        format!("Row {}: {} -> {}", self.row, self.reason, self.raw)
    }
}

/// Validates `name,level,score`. The name is kept verbatim; numeric fields
/// tolerate surrounding whitespace. Scores must be finite.
pub fn parse_row(record: &StringRecord) -> Result<PlayerRow, RowRejection> {
    if record.len() != EXPECTED_COLUMNS {
        return Err(RowRejection::ColumnCount(record.len()));
    }

    let level = record[1]
        .trim()
        .parse::<i64>()
        .map_err(|_| RowRejection::InvalidLevel)?;
    let score = record[2]
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|score| score.is_finite())
        .ok_or(RowRejection::InvalidScore)?;

    Ok(PlayerRow {
        name: record[0].to_string(),
        level,
        score,
    })
}
