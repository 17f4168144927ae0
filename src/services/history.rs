use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use log::info;
use serde::Serialize;

use crate::database::{self, DbPool};
use crate::ranking::{self, RankingEntry};

/// Second resolution, local time
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySnapshot {
    pub taken_at: String,
    pub entries: Vec<RankingEntry>,
}

/// Append-only archive of ranking snapshots
#[derive(Clone)]
pub struct HistoryArchive {
    pool: DbPool,
}

impl HistoryArchive {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn append_snapshot(&self) -> Result<HistorySnapshot> {
        self.append_snapshot_at(Local::now().naive_local())
    }

    pub fn append_snapshot_at(&self, taken_at: NaiveDateTime) -> Result<HistorySnapshot> {
        let entries = ranking::current_ranking(&self.pool)?;
        let payload = serde_json::to_string(&entries).context("Failed to serialize ranking")?;
        let taken_at = taken_at.format(TIMESTAMP_FORMAT).to_string();

        let mut conn = database::get_connection(&self.pool)?;
        database::history::insert_snapshot(&mut conn, &taken_at, &payload)?;

        info!("Ranking snapshot saved at {} ({} players)", taken_at, entries.len());
        Ok(HistorySnapshot { taken_at, entries })
    }

    pub fn list_timestamps(&self) -> Result<Vec<String>> {
        let mut conn = database::get_connection(&self.pool)?;
        database::history::list_timestamps(&mut conn)
    }

    pub fn get_snapshot(&self, timestamp: &str) -> Result<Option<Vec<RankingEntry>>> {
        let mut conn = database::get_connection(&self.pool)?;
        let Some(snapshot) = database::history::find_by_timestamp(&mut conn, timestamp)? else {
            return Ok(None);
        };

        let entries: Vec<RankingEntry> = serde_json::from_str(&snapshot.payload)
            .with_context(|| format!("Corrupt ranking payload in snapshot {}", snapshot.id))?;
        Ok(Some(entries))
    }
}
