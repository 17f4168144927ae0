use anyhow::{Context, Result};

use super::connection::DbConn;

/// Creates missing tables. Existing data is left untouched.
pub fn ensure_schema(conn: &mut DbConn) -> Result<()> {
    let schema_sql = include_str!("schema.sql");
    let statements = split_sql_statements(schema_sql);

    for (idx, statement) in statements.iter().enumerate() {
        execute_sql(conn, statement)
            .with_context(|| format!("Failed to execute statement {}", idx + 1))?;
    }

    log::info!("Database schema ready");
    Ok(())
}

fn split_sql_statements(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn execute_sql(conn: &mut DbConn, sql: &str) -> Result<()> {
    conn.execute(sql, [])
        .context("Failed to execute SQL statement")
        .map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_skips_blank_statements() {
        let statements = split_sql_statements("CREATE TABLE a (x);\n\n ;CREATE TABLE b (y);\n");
        assert_eq!(statements, vec!["CREATE TABLE a (x)", "CREATE TABLE b (y)"]);
    }

    #[test]
    fn test_schema_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let pool = crate::database::create_pool(&dir.path().join("test.db")).unwrap();
        let mut conn = crate::database::get_connection(&pool).unwrap();

        ensure_schema(&mut conn).unwrap();
        conn.execute(
            "INSERT INTO players (name, level, score) VALUES ('Ana', 5, 120.5)",
            [],
        )
        .unwrap();
        ensure_schema(&mut conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM players", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
