//! Item record.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

use lk_core::error::{LmError, LmResult};

use super::list::ListId;
use super::{empty_to_none, db_err, now_timestamp, parse_timestamp};

/// Row id of an item.
pub type ItemId = i64;

/// A single entry within a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub list_id: ListId,
    pub name: String,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub(crate) const ITEM_COLUMNS: &str = "id, list_id, name, address, notes, created_at";

impl Item {
    /// Construct an Item from a database row selected with `ITEM_COLUMNS`.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let created_at: String = row.get("created_at")?;
        Ok(Self {
            id: row.get("id")?,
            list_id: row.get("list_id")?,
            name: row.get("name")?,
            address: row.get("address")?,
            notes: row.get("notes")?,
            created_at: parse_timestamp(5, &created_at)?,
        })
    }

    pub fn address_text(&self) -> &str {
        self.address.as_deref().unwrap_or("")
    }

    pub fn notes_text(&self) -> &str {
        self.notes.as_deref().unwrap_or("")
    }

    /// Find an item by its id.
    pub fn find_by_id(conn: &Connection, id: ItemId) -> LmResult<Option<Self>> {
        conn.query_row(
            &format!("SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"),
            [id],
            Self::from_row,
        )
        .optional()
        .map_err(db_err)
    }

    /// Insert an item under `list_id`. Returns its id.
    ///
    /// A foreign key violation (the list is gone) is reported as
    /// `LmError::Referential` rather than a generic database error.
    pub fn insert(
        conn: &Connection,
        list_id: ListId,
        name: &str,
        address: Option<&str>,
        notes: Option<&str>,
    ) -> LmResult<ItemId> {
        conn.execute(
            "INSERT INTO items (list_id, name, address, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                list_id,
                name,
                empty_to_none(address),
                empty_to_none(notes),
                now_timestamp(),
            ],
        )
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                LmError::Referential { list_id }
            } else {
                db_err(e)
            }
        })?;
        Ok(conn.last_insert_rowid())
    }

    /// Replace name, address and notes. Returns false when no row has this id.
    pub fn update(
        conn: &Connection,
        id: ItemId,
        name: &str,
        address: Option<&str>,
        notes: Option<&str>,
    ) -> LmResult<bool> {
        let changed = conn
            .execute(
                "UPDATE items SET name = ?1, address = ?2, notes = ?3 WHERE id = ?4",
                params![name, empty_to_none(address), empty_to_none(notes), id],
            )
            .map_err(db_err)?;
        Ok(changed > 0)
    }

    /// Delete a single item. Returns false when no row has this id.
    pub fn delete(conn: &Connection, id: ItemId) -> LmResult<bool> {
        let changed = conn
            .execute("DELETE FROM items WHERE id = ?1", [id])
            .map_err(db_err)?;
        Ok(changed > 0)
    }

    /// Delete every item of a list. Returns the number removed.
    pub fn delete_for_list(conn: &Connection, list_id: ListId) -> LmResult<usize> {
        conn.execute("DELETE FROM items WHERE list_id = ?1", [list_id])
            .map_err(db_err)
    }
}

fn is_foreign_key_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}
