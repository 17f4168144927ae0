use anyhow::{Context, Result};
use rusqlite::{params, OptionalExtension};

use super::connection::DbConn;
use super::models::DbSnapshot;

pub fn insert_snapshot(conn: &mut DbConn, taken_at: &str, payload: &str) -> Result<DbSnapshot> {
    let sql = "INSERT INTO ranking_history (taken_at, payload) VALUES (?1, ?2) RETURNING id, taken_at, payload";

    conn.query_row(sql, params![taken_at, payload], parse_snapshot_row)
        .context("Failed to insert ranking snapshot")
}

fn parse_snapshot_row(row: &rusqlite::Row) -> rusqlite::Result<DbSnapshot> {
    Ok(DbSnapshot {
        id: row.get(0)?,
        taken_at: row.get(1)?,
        payload: row.get(2)?,
    })
}

/// Most recent first, duplicates included.
pub fn list_timestamps(conn: &mut DbConn) -> Result<Vec<String>> {
    let sql = "SELECT taken_at FROM ranking_history ORDER BY taken_at DESC, id DESC";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;

    Ok(rows)
}

/// Exact match on the timestamp; the latest append wins when several share it.
pub fn find_by_timestamp(conn: &mut DbConn, taken_at: &str) -> Result<Option<DbSnapshot>> {
    let sql = "SELECT id, taken_at, payload FROM ranking_history WHERE taken_at = ?1 ORDER BY id DESC LIMIT 1";

    conn.query_row(sql, params![taken_at], parse_snapshot_row)
        .optional()
        .context("Failed to query ranking snapshot by timestamp")
}
