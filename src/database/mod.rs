pub mod connection;
pub mod history;
pub mod models;
pub mod players;
pub mod setup;

use anyhow::Result;
use std::path::Path;

pub use connection::{create_pool, get_connection, DbConn, DbPool};
pub use models::*;

/// Opens the database at `path`, creating missing tables.
pub fn open(path: &Path) -> Result<DbPool> {
    let pool = create_pool(path)?;
    let mut conn = get_connection(&pool)?;
    setup::ensure_schema(&mut conn)?;
    drop(conn);
    Ok(pool)
}

#[cfg(test)]
pub(crate) fn test_pool() -> (tempfile::TempDir, DbPool) {
    let dir = tempfile::tempdir().expect("temp dir");
    let pool = open(&dir.path().join("test.db")).expect("database");
    (dir, pool)
}
