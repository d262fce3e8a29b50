//! Query builders for the collection views.
//!
//! Provides ordered and filtered reads over lists and items. All queries use
//! parameterized SQL and return record types.
//!
//! Ordering ties on `created_at` are broken by id, so two rows written in the
//! same millisecond still come back in insertion order.

use std::collections::HashMap;
use rusqlite::{params, Connection};
use lk_core::error::{LmError, LmResult};

use crate::models::item::{Item, ITEM_COLUMNS};
use crate::models::list::{List, ListId, LIST_COLUMNS};

// ─── List Queries ───────────────────────────────────────────────────────────

/// All lists, newest first.
pub fn list_all(conn: &Connection) -> LmResult<Vec<List>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {LIST_COLUMNS} FROM lists ORDER BY created_at DESC, id DESC"
        ))
        .map_err(|e| LmError::Database(e.to_string()))?;

    let lists = stmt
        .query_map([], List::from_row)
        .map_err(|e| LmError::Database(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| LmError::Database(e.to_string()))?;

    Ok(lists)
}

/// Search lists by title or note, newest first.
///
/// Matching is a case-insensitive substring test. LIKE wildcards in the
/// query are escaped so `50%` only matches a literal `50%`. A blank query
/// matches every list; any other query is matched as given, surrounding
/// whitespace included.
pub fn search_lists(conn: &Connection, query: &str) -> LmResult<Vec<List>> {
    if query.trim().is_empty() {
        return list_all(conn);
    }

    // SQLite's lower() only folds ASCII, so non-ASCII queries are matched
    // with Unicode folding over the ordered list instead.
    if !query.is_ascii() {
        let needle = query.to_lowercase();
        return Ok(list_all(conn)?
            .into_iter()
            .filter(|l| {
                l.title.to_lowercase().contains(&needle)
                    || l.note_text().to_lowercase().contains(&needle)
            })
            .collect());
    }

    let pattern = format!("%{}%", escape_like(&query.to_lowercase()));
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {LIST_COLUMNS} FROM lists
             WHERE lower(title) LIKE ?1 ESCAPE '\\'
                OR lower(COALESCE(note, '')) LIKE ?1 ESCAPE '\\'
             ORDER BY created_at DESC, id DESC"
        ))
        .map_err(|e| LmError::Database(e.to_string()))?;

    let lists = stmt
        .query_map(params![pattern], List::from_row)
        .map_err(|e| LmError::Database(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| LmError::Database(e.to_string()))?;

    Ok(lists)
}

// ─── Item Queries ───────────────────────────────────────────────────────────

/// Items of a list, oldest first. Empty when the list has no items or does
/// not exist.
pub fn items_for_list(conn: &Connection, list_id: ListId) -> LmResult<Vec<Item>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {ITEM_COLUMNS} FROM items
             WHERE list_id = ?1
             ORDER BY created_at ASC, id ASC"
        ))
        .map_err(|e| LmError::Database(e.to_string()))?;

    let items = stmt
        .query_map([list_id], Item::from_row)
        .map_err(|e| LmError::Database(e.to_string()))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| LmError::Database(e.to_string()))?;

    Ok(items)
}

/// Number of items per list. Lists without items are absent from the map.
pub fn item_counts(conn: &Connection) -> LmResult<HashMap<ListId, i64>> {
    let mut stmt = conn
        .prepare("SELECT list_id, COUNT(*) FROM items GROUP BY list_id")
        .map_err(|e| LmError::Database(e.to_string()))?;

    let counts = stmt
        .query_map([], |row| Ok((row.get::<_, ListId>(0)?, row.get::<_, i64>(1)?)))
        .map_err(|e| LmError::Database(e.to_string()))?
        .collect::<Result<HashMap<_, _>, _>>()
        .map_err(|e| LmError::Database(e.to_string()))?;

    Ok(counts)
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
