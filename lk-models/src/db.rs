//! Database initialization, connection pooling, and lifecycle management.
//!
//! Uses SQLite (WAL mode by default) with r2d2 connection pooling.
//! Runs integrity checks on startup and applies versioned migrations.
//! Every pooled connection enforces foreign keys, which is what makes the
//! `items -> lists` cascade work.

use std::path::Path;
use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use tracing::{info, warn, error};

use lk_core::error::{LmError, LmResult};
use lk_core::config::DatabaseConfig;

use crate::schema;
use crate::migrations;

/// Type alias for the SQLite connection pool.
type DbPool = Pool<SqliteConnectionManager>;

/// Database wrapper providing initialization, pooling, and lifecycle management.
#[derive(Clone)]
pub struct Database {
    pool: Arc<DbPool>,
}

impl Database {
    /// Initialize the database at the given path with the provided configuration.
    ///
    /// This:
    /// 1. Creates the database file and parent directories if needed
    /// 2. Sets up connection pooling with per-connection pragmas
    /// 3. Runs integrity checks if configured
    /// 4. Creates the schema tables
    /// 5. Runs pending migrations
    ///
    /// Calling it again on an existing database is a no-op apart from the checks.
    pub fn init(db_path: &Path, config: &DatabaseConfig) -> LmResult<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        info!("initializing database at {}", db_path.display());

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(config.pool_size.max(1))
            .connection_customizer(Box::new(ConnectionCustomizer {
                wal_mode: config.wal_mode,
            }))
            .build(manager)
            .map_err(|e| LmError::Pool(e.to_string()))?;

        let db = Self {
            pool: Arc::new(pool),
        };

        if config.integrity_check_on_startup {
            db.run_integrity_check()?;
        }

        // Create schema and run migrations
        db.transaction(|conn| {
            schema::create_tables(conn)?;
            migrations::run_migrations(conn)
        })?;

        info!("database initialized successfully");
        Ok(db)
    }

    /// Get a connection from the pool.
    pub fn conn(&self) -> LmResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| LmError::Pool(e.to_string()))
    }

    /// Run a SQLite integrity check.
    pub fn run_integrity_check(&self) -> LmResult<()> {
        let conn = self.conn()?;
        let result: String = conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))
            .map_err(|e| LmError::Database(e.to_string()))?;

        if result != "ok" {
            error!("database integrity check failed: {result}");
            return Err(LmError::IntegrityCheck(result));
        }

        info!("database integrity check passed");
        Ok(())
    }

    /// List foreign key violations as `table row N -> parent` strings.
    pub fn foreign_key_violations(&self) -> LmResult<Vec<String>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("PRAGMA foreign_key_check")
            .map_err(|e| LmError::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| {
                let table: String = row.get(0)?;
                let rowid: i64 = row.get(1)?;
                let parent: String = row.get(2)?;
                Ok(format!("{table} row {rowid} -> {parent}"))
            })
            .map_err(|e| LmError::Database(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| LmError::Database(e.to_string()))?;
        Ok(rows)
    }

    /// Execute a function within a database transaction.
    ///
    /// The transaction commits only if `f` succeeds; on error it is rolled
    /// back when dropped, so no partial writes survive.
    pub fn transaction<T, F>(&self, f: F) -> LmResult<T>
    where
        F: FnOnce(&Connection) -> LmResult<T>,
    {
        let mut conn = self.conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| LmError::Database(e.to_string()))?;

        let result = f(&tx)?;

        tx.commit()
            .map_err(|e| LmError::Database(e.to_string()))?;

        Ok(result)
    }

    /// Get database statistics (row counts per table).
    pub fn stats(&self) -> LmResult<DatabaseStats> {
        let conn = self.conn()?;

        let count = |table: &str| -> LmResult<i64> {
            let sql = format!("SELECT COUNT(*) FROM {table}");
            conn.query_row(&sql, [], |row| row.get(0))
                .map_err(|e| LmError::Database(e.to_string()))
        };

        Ok(DatabaseStats {
            lists: count("lists")?,
            items: count("items")?,
        })
    }

    /// Reset the database by dropping and recreating all tables.
    pub fn reset(&self) -> LmResult<()> {
        warn!("resetting database - all lists and items will be lost");
        self.transaction(|conn| {
            schema::drop_tables(conn)?;
            schema::create_tables(conn)?;
            migrations::run_migrations(conn)
        })?;
        info!("database reset complete");
        Ok(())
    }
}

/// Database row count statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct DatabaseStats {
    pub lists: i64,
    pub items: i64,
}

impl std::fmt::Display for DatabaseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "lists={}, items={}", self.lists, self.items)
    }
}

/// r2d2 connection customizer that applies PRAGMA settings.
#[derive(Debug)]
struct ConnectionCustomizer {
    wal_mode: bool,
}

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for ConnectionCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        if self.wal_mode {
            conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        }

        // Writes must be durable before an operation returns.
        conn.execute_batch(
            "PRAGMA synchronous=FULL;
             PRAGMA temp_store=MEMORY;
             PRAGMA busy_timeout=5000;
             PRAGMA foreign_keys=ON;",
        )?;

        Ok(())
    }
}
