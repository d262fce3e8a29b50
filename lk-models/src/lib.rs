//! ListKeeper Models - Database schema, records, migrations, and query builders.
//!
//! This crate owns all data persistence: SQLite database initialization,
//! the `lists` and `items` tables, versioned migrations, and query builders
//! for the ordered and filtered views the pages need.

pub mod db;
pub mod schema;
pub mod models;
pub mod queries;
pub mod migrations;

// Re-export key types
pub use db::{Database, DatabaseStats};
pub use models::list::{List, ListId};
pub use models::item::{Item, ItemId};
