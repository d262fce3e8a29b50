//! Shared test utilities for integration tests.

#![allow(dead_code)]

use lk_core::config::{AppConfig, DatabaseConfig};
use lk_models::Database;
use lk_services::{Controller, ListStore};
use tempfile::TempDir;

/// Create a temporary database with full schema and migrations applied.
/// Returns the Database and the TempDir (must be held alive for the duration of the test).
pub fn create_test_db() -> (Database, TempDir) {
    lk_core::logging::init_console_logging("warn");
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::default();
    let db = Database::init(&path, &config).expect("failed to init test database");
    (db, dir)
}

/// A store over a fresh temporary database.
pub fn create_test_store() -> (ListStore, TempDir) {
    let (db, dir) = create_test_db();
    (ListStore::new(db), dir)
}

/// A controller over a fresh temporary database.
pub fn create_test_controller() -> (Controller, TempDir) {
    let (store, dir) = create_test_store();
    (Controller::new(store), dir)
}

/// Create a default test configuration.
pub fn create_test_config() -> AppConfig {
    AppConfig::default()
}

/// Seed the store with a small realistic data set.
///
/// Creates, oldest first:
/// - "Groceries" with Milk (notes "2%") and Eggs
/// - "Contacts" (note "work people") with Ada at "12 Analytical Way"
/// - "Trip" with no items
///
/// Returns the list ids in creation order.
pub fn seed_test_data(store: &ListStore) -> Vec<i64> {
    let groceries = store.create_list("Groceries", "").expect("seed list");
    store
        .add_item_to_list(groceries, "Milk", "", "2%")
        .expect("seed item");
    store
        .add_item_to_list(groceries, "Eggs", "", "")
        .expect("seed item");

    let contacts = store.create_list("Contacts", "work people").expect("seed list");
    store
        .add_item_to_list(contacts, "Ada", "12 Analytical Way", "")
        .expect("seed item");

    let trip = store.create_list("Trip", "").expect("seed list");

    vec![groceries, contacts, trip]
}
