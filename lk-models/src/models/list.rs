//! List record.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use lk_core::error::LmResult;

use super::{empty_to_none, db_err, now_timestamp, parse_timestamp};

/// Row id of a list.
pub type ListId = i64;

/// A named, user-created collection of items.
///
/// `title` is never empty once persisted. `created_at` is assigned on
/// insert and never rewritten by updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: ListId,
    pub title: String,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Column list shared by every query that materializes a `List`.
pub(crate) const LIST_COLUMNS: &str = "id, title, note, created_at";

impl List {
    /// Construct a List from a database row selected with `LIST_COLUMNS`.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let created_at: String = row.get("created_at")?;
        Ok(Self {
            id: row.get("id")?,
            title: row.get("title")?,
            note: row.get("note")?,
            created_at: parse_timestamp(3, &created_at)?,
        })
    }

    /// Note text, treating a stored empty string like an absent note.
    pub fn note_text(&self) -> &str {
        self.note.as_deref().unwrap_or("")
    }

    // ─── Static finders ──────────────────────────────────────────────────

    /// Find a list by its id.
    pub fn find_by_id(conn: &Connection, id: ListId) -> LmResult<Option<Self>> {
        conn.query_row(
            &format!("SELECT {LIST_COLUMNS} FROM lists WHERE id = ?1"),
            [id],
            Self::from_row,
        )
        .optional()
        .map_err(db_err)
    }

    /// Whether a list with this id exists.
    pub fn exists(conn: &Connection, id: ListId) -> LmResult<bool> {
        conn.query_row("SELECT EXISTS(SELECT 1 FROM lists WHERE id = ?1)", [id], |row| {
            row.get::<_, bool>(0)
        })
        .map_err(db_err)
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Insert a new list stamped with the current time. Returns its id.
    pub fn insert(conn: &Connection, title: &str, note: Option<&str>) -> LmResult<ListId> {
        conn.execute(
            "INSERT INTO lists (title, note, created_at) VALUES (?1, ?2, ?3)",
            params![title, empty_to_none(note), now_timestamp()],
        )
        .map_err(db_err)?;
        Ok(conn.last_insert_rowid())
    }

    /// Replace title and note. Returns false when no row has this id.
    pub fn update(conn: &Connection, id: ListId, title: &str, note: Option<&str>) -> LmResult<bool> {
        let changed = conn
            .execute(
                "UPDATE lists SET title = ?1, note = ?2 WHERE id = ?3",
                params![title, empty_to_none(note), id],
            )
            .map_err(db_err)?;
        Ok(changed > 0)
    }

    /// Delete a list row. Returns false when no row has this id.
    ///
    /// Items go with it through the `ON DELETE CASCADE` foreign key; callers
    /// that need the cascade to be atomic run this inside a transaction.
    pub fn delete(conn: &Connection, id: ListId) -> LmResult<bool> {
        let changed = conn
            .execute("DELETE FROM lists WHERE id = ?1", [id])
            .map_err(db_err)?;
        Ok(changed > 0)
    }
}
