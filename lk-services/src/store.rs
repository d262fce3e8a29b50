//! Persistence facade over lists and items.
//!
//! `ListStore` is the only way the rest of the application touches storage.
//! Every mutating operation runs in its own transaction and has committed
//! before the call returns, so a read right after a write sees it.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, info, warn};

use lk_core::config::DatabaseConfig;
use lk_core::constants::messages;
use lk_core::error::{LmError, LmResult};
use lk_models::queries;
use lk_models::{Database, DatabaseStats, Item, ItemId, List, ListId};

/// Create/read/update/delete and search operations for lists and items.
#[derive(Clone)]
pub struct ListStore {
    database: Database,
}

impl ListStore {
    /// Wrap an already initialized database.
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Open (creating if needed) the store at `path`.
    ///
    /// Safe to call against an existing file: the schema is only created
    /// when missing and existing rows are left alone.
    pub fn open(path: &Path, config: &DatabaseConfig) -> LmResult<Self> {
        let database = Database::init(path, config)?;
        Ok(Self::new(database))
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.database
    }

    // ─── Lists ──────────────────────────────────────────────────────────

    /// Create a list stamped with the current time. Returns the new id.
    pub fn create_list(&self, title: &str, note: &str) -> LmResult<ListId> {
        require("title", title, messages::TITLE_REQUIRED)?;
        debug!("creating list '{title}'");

        let id = self
            .database
            .transaction(|conn| List::insert(conn, title, Some(note)))?;

        info!("created list {id}");
        Ok(id)
    }

    /// Every list, newest first.
    pub fn get_all_lists(&self) -> LmResult<Vec<List>> {
        let conn = self.database.conn()?;
        queries::list_all(&conn)
    }

    /// Lists whose title or note contains `query`, ignoring case.
    ///
    /// A blank query returns every list. No match is an empty result.
    pub fn search_lists(&self, query: &str) -> LmResult<Vec<List>> {
        debug!("searching lists for '{query}'");
        let conn = self.database.conn()?;
        queries::search_lists(&conn, query)
    }

    /// Look up a list. `None` when the id does not exist.
    pub fn get_list_by_id(&self, id: ListId) -> LmResult<Option<List>> {
        let conn = self.database.conn()?;
        List::find_by_id(&conn, id)
    }

    /// Replace a list's title and note.
    ///
    /// Fails with `NotFound` when the list does not exist.
    pub fn update_list_details(&self, id: ListId, title: &str, note: &str) -> LmResult<()> {
        require("title", title, messages::TITLE_REQUIRED)?;
        debug!("updating list {id}");

        let updated = self
            .database
            .transaction(|conn| List::update(conn, id, title, Some(note)))?;

        if !updated {
            warn!("update of missing list {id}");
            return Err(LmError::list_not_found(id));
        }

        info!("updated list {id}");
        Ok(())
    }

    /// Delete a list together with all of its items. Returns the removed list.
    ///
    /// Items and list go in one transaction; either both are gone or
    /// neither is.
    pub fn delete_list(&self, id: ListId) -> LmResult<List> {
        debug!("deleting list {id}");

        let (list, removed_items) = self.database.transaction(|conn| {
            let list = List::find_by_id(conn, id)?.ok_or_else(|| LmError::list_not_found(id))?;
            let removed_items = Item::delete_for_list(conn, id)?;
            List::delete(conn, id)?;
            Ok((list, removed_items))
        })
        .map_err(|e| {
            if e.is_not_found() {
                warn!("delete of missing list {id}");
            }
            e
        })?;

        info!("deleted list {id} and {removed_items} item(s)");
        Ok(list)
    }

    // ─── Items ──────────────────────────────────────────────────────────

    /// Append an item to a list. Returns the new item id.
    ///
    /// Fails with `Referential` and writes nothing when the list does not
    /// exist.
    pub fn add_item_to_list(
        &self,
        list_id: ListId,
        name: &str,
        address: &str,
        notes: &str,
    ) -> LmResult<ItemId> {
        require("name", name, messages::ITEM_NAME_REQUIRED)?;
        debug!("adding item '{name}' to list {list_id}");

        let id = self
            .database
            .transaction(|conn| {
                if !List::exists(conn, list_id)? {
                    return Err(LmError::Referential { list_id });
                }
                Item::insert(conn, list_id, name, Some(address), Some(notes))
            })
            .map_err(|e| {
                if let LmError::Referential { .. } = e {
                    warn!("item rejected, list {list_id} does not exist");
                }
                e
            })?;

        info!("added item {id} to list {list_id}");
        Ok(id)
    }

    /// Items of a list, oldest first. Empty for a list without items and
    /// for an unknown list.
    pub fn get_items_for_list(&self, list_id: ListId) -> LmResult<Vec<Item>> {
        let conn = self.database.conn()?;
        queries::items_for_list(&conn, list_id)
    }

    /// Look up an item. `None` when the id does not exist.
    pub fn get_item_by_id(&self, id: ItemId) -> LmResult<Option<Item>> {
        let conn = self.database.conn()?;
        Item::find_by_id(&conn, id)
    }

    /// Replace an item's name, address and notes.
    ///
    /// Fails with `NotFound` when the item does not exist.
    pub fn update_list_item(
        &self,
        id: ItemId,
        name: &str,
        address: &str,
        notes: &str,
    ) -> LmResult<()> {
        require("name", name, messages::ITEM_NAME_EMPTY)?;
        debug!("updating item {id}");

        let updated = self
            .database
            .transaction(|conn| Item::update(conn, id, name, Some(address), Some(notes)))?;

        if !updated {
            warn!("update of missing item {id}");
            return Err(LmError::item_not_found(id));
        }

        info!("updated item {id}");
        Ok(())
    }

    /// Delete a single item. Returns the removed item.
    pub fn delete_list_item(&self, id: ItemId) -> LmResult<Item> {
        debug!("deleting item {id}");

        let item = self.database.transaction(|conn| {
            let item = Item::find_by_id(conn, id)?.ok_or_else(|| LmError::item_not_found(id))?;
            Item::delete(conn, id)?;
            Ok(item)
        });

        match item {
            Ok(item) => {
                info!("deleted item {id} from list {}", item.list_id);
                Ok(item)
            }
            Err(e) => {
                warn!("failed to delete item {id}: {e}");
                Err(e)
            }
        }
    }

    // ─── Aggregates ─────────────────────────────────────────────────────

    /// Item count per list id. Lists without items are absent.
    pub fn item_counts(&self) -> LmResult<HashMap<ListId, i64>> {
        let conn = self.database.conn()?;
        queries::item_counts(&conn)
    }

    /// Row counts for both tables.
    pub fn stats(&self) -> LmResult<DatabaseStats> {
        self.database.stats()
    }
}

/// Reject a required field that is empty or only whitespace.
fn require(field: &'static str, value: &str, message: &str) -> LmResult<()> {
    if value.trim().is_empty() {
        return Err(LmError::required(field, message));
    }
    Ok(())
}
