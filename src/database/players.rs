use anyhow::{Context, Result};
use rusqlite::params;

use super::connection::DbConn;
use super::models::Player;

/// Inserts a player or overwrites level and score of the one with the same name.
/// The row id of an existing player is preserved.
pub fn upsert_player(conn: &mut DbConn, name: &str, level: i64, score: f64) -> Result<Player> {
    let sql = "INSERT INTO players (name, level, score) VALUES (?1, ?2, ?3) \
               ON CONFLICT(name) DO UPDATE SET level = excluded.level, score = excluded.score \
               RETURNING id, name, level, score";

    conn.query_row(sql, params![name, level, score], parse_player_row)
        .with_context(|| format!("Failed to upsert player {}", name))
}

fn parse_player_row(row: &rusqlite::Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        name: row.get(1)?,
        level: row.get(2)?,
        score: row.get(3)?,
    })
}

#[cfg(test)]
pub(crate) fn find_by_name(conn: &mut DbConn, name: &str) -> Result<Option<Player>> {
    use rusqlite::OptionalExtension;

    let sql = "SELECT id, name, level, score FROM players WHERE name = ?1";

    conn.query_row(sql, params![name], parse_player_row)
        .optional()
        .context("Failed to query player by name")
}

/// Highest score first; equal scores keep insertion order.
pub fn list_all_sorted_by_score_desc(conn: &mut DbConn) -> Result<Vec<Player>> {
    let sql = "SELECT id, name, level, score FROM players ORDER BY score DESC, id ASC";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_player_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(rows)
}

pub fn count(conn: &mut DbConn) -> Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM players", [], |row| row.get(0))
        .context("Failed to count players")
}
