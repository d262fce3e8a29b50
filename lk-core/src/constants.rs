//! Application-wide constants.

/// Application name.
pub const APP_NAME: &str = "ListKeeper";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory (relative to the working directory) holding persisted state.
pub const DATA_DIR_NAME: &str = "data";

/// SQLite database file name inside the data directory.
pub const DB_FILE_NAME: &str = "list_app.db";

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Log directory name inside the data directory.
pub const LOG_DIR_NAME: &str = "logs";

/// Rolling log file prefix.
pub const LOG_FILE_NAME: &str = "listkeeper.log";

/// Database schema version.
pub const DB_SCHEMA_VERSION: i32 = 1;

/// Default number of characters of a list note shown on the home page.
pub const DEFAULT_NOTE_PREVIEW_CHARS: usize = 50;

/// User-facing messages shared by the controller and the renderer.
pub mod messages {
    pub const TITLE_REQUIRED: &str = "Title is required.";
    pub const ITEM_NAME_REQUIRED: &str = "Item name is required.";
    pub const ITEM_NAME_EMPTY: &str = "Item name cannot be empty.";
    pub const LIST_NOT_FOUND: &str = "List not found.";
    pub const LIST_NOT_FOUND_FOR_EDIT: &str = "List not found for editing.";
    pub const ITEM_NOT_FOUND: &str = "Item not found.";
    pub const NO_LISTS: &str = "No lists yet. Choose 'Create new list' to get started!";
    pub const NO_ITEMS: &str = "No items in this list yet. Add some with 'Add item'.";
}
