//! Versioned database migrations.
//!
//! Migrations run sequentially from the current stored version to the latest.
//! Each migration is safe to re-run against a database it already touched.

use rusqlite::Connection;
use tracing::{info, warn};
use lk_core::error::{LmError, LmResult};
use lk_core::constants::DB_SCHEMA_VERSION;

/// Run all pending migrations on the database.
pub fn run_migrations(conn: &Connection) -> LmResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version >= DB_SCHEMA_VERSION {
        info!("database schema is up to date (version {current_version})");
        return Ok(());
    }

    info!("running migrations from version {current_version} to {DB_SCHEMA_VERSION}");

    for version in (current_version + 1)..=DB_SCHEMA_VERSION {
        run_migration(conn, version)?;
    }

    set_schema_version(conn, DB_SCHEMA_VERSION)?;
    info!("migrations complete, schema at version {DB_SCHEMA_VERSION}");
    Ok(())
}

/// Get the current schema version from the database.
pub fn get_schema_version(conn: &Connection) -> LmResult<i32> {
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .map_err(|e| LmError::Database(e.to_string()))?;

    if count == 0 {
        // First run - set version to 0
        conn.execute("INSERT INTO schema_version (version) VALUES (0)", [])
            .map_err(|e| LmError::Database(e.to_string()))?;
        return Ok(0);
    }

    conn.query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
        row.get(0)
    })
    .map_err(|e| LmError::Database(e.to_string()))
}

fn set_schema_version(conn: &Connection, version: i32) -> LmResult<()> {
    conn.execute("UPDATE schema_version SET version = ?1", [version])
        .map_err(|e| LmError::Database(e.to_string()))?;
    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> LmResult<()> {
    info!("applying migration version {version}");

    match version {
        1 => migration_v1(conn),
        _ => {
            warn!("unknown migration version {version}, skipping");
            Ok(())
        }
    }
}

/// Migration v1: rewrite `created_at` values stamped with SQLite's
/// `CURRENT_TIMESTAMP` text (`YYYY-MM-DD HH:MM:SS`) into the RFC 3339 form the
/// records parse.
fn migration_v1(conn: &Connection) -> LmResult<()> {
    let normalized = conn
        .execute(
            "UPDATE lists
             SET created_at = strftime('%Y-%m-%dT%H:%M:%fZ', COALESCE(created_at, CURRENT_TIMESTAMP))
             WHERE created_at IS NULL OR created_at NOT LIKE '%T%'",
            [],
        )
        .map_err(|e| LmError::Migration(format!("normalizing list timestamps: {e}")))?;
    if normalized > 0 {
        info!("normalized {normalized} list timestamp(s)");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;

    #[test]
    fn test_migrations_on_fresh_db() {
        let conn = Connection::open_in_memory().unwrap();
        schema::create_tables(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, DB_SCHEMA_VERSION);
    }

    #[test]
    fn test_migrations_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        schema::create_tables(&conn).unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap(); // Should be a no-op
        assert_eq!(get_schema_version(&conn).unwrap(), DB_SCHEMA_VERSION);
    }

    #[test]
    fn test_sqlite_timestamps_are_normalized() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE lists (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                note TEXT,
                created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
             );
             INSERT INTO lists (title, note, created_at) VALUES ('Groceries', '  ', '2024-03-01 09:30:00');",
        )
        .unwrap();

        schema::create_tables(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let (created_at, note): (String, Option<String>) = conn
            .query_row("SELECT created_at, note FROM lists WHERE id = 1", [], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .unwrap();
        assert_eq!(created_at, "2024-03-01T09:30:00.000Z");
        assert_eq!(note.as_deref(), Some("  "));
    }
}
