//! Integration tests for application configuration.
//!
//! Tests config loading from TOML, saving and reloading, default values,
//! ConfigHandle shared access, and how the configured paths feed the store.

mod common;

use lk_core::config::{AppConfig, ConfigHandle};
use lk_services::ListStore;
use tempfile::TempDir;

// ---- Default values ----

#[test]
fn default_config_has_expected_database_defaults() {
    let config = common::create_test_config();
    assert!(config.database.path.is_empty(), "default db path should be empty");
    assert!(config.database.wal_mode, "WAL mode should be enabled by default");
    assert_eq!(config.database.pool_size, 4);
    assert!(config.database.integrity_check_on_startup);
}

#[test]
fn default_config_has_expected_logging_defaults() {
    let config = common::create_test_config();
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.directory.is_empty());
    assert!(!config.logging.json_output);
}

#[test]
fn default_config_has_expected_display_defaults() {
    let config = common::create_test_config();
    assert_eq!(config.display.note_preview_chars, 50);
    assert_eq!(config.display.timestamp_format, "%Y-%m-%d %H:%M");
    assert!(config.display.show_timestamps);
    assert!(config.display.confirm_deletes);
}

// ---- TOML ----

#[test]
fn config_toml_roundtrip_preserves_all_fields() {
    let mut config = AppConfig::default();
    config.database.path = "lists/custom.db".into();
    config.database.pool_size = 8;
    config.database.wal_mode = false;
    config.logging.level = "debug".into();
    config.logging.json_output = true;
    config.display.note_preview_chars = 20;
    config.display.confirm_deletes = false;

    let toml_str = toml::to_string_pretty(&config).unwrap();
    let deserialized: AppConfig = toml::from_str(&toml_str).unwrap();

    assert_eq!(deserialized.database.path, "lists/custom.db");
    assert_eq!(deserialized.database.pool_size, 8);
    assert!(!deserialized.database.wal_mode);
    assert_eq!(deserialized.logging.level, "debug");
    assert!(deserialized.logging.json_output);
    assert_eq!(deserialized.display.note_preview_chars, 20);
    assert!(!deserialized.display.confirm_deletes);
}

#[test]
fn config_toml_deserialization_applies_defaults_for_missing_fields() {
    // Minimal TOML that only sets one field
    let toml_str = r#"
[display]
note_preview_chars = 10
"#;

    let config: AppConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.display.note_preview_chars, 10);
    // All other fields should have defaults
    assert!(config.display.confirm_deletes);
    assert!(config.database.wal_mode);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn config_toml_empty_string_deserializes_to_defaults() {
    let config: AppConfig = toml::from_str("").unwrap();
    assert!(config.database.path.is_empty());
    assert_eq!(config.database.pool_size, 4);
}

// ---- File save and load ----

#[test]
fn config_save_and_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = AppConfig::default();
    config.database.path = "elsewhere.db".into();
    config.display.show_timestamps = false;

    config.save_to_file(&path).unwrap();
    assert!(path.exists(), "config file should be created");

    let loaded = AppConfig::load_from_file(&path).unwrap();
    assert_eq!(loaded.database.path, "elsewhere.db");
    assert!(!loaded.display.show_timestamps);
}

#[test]
fn config_save_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deep").join("config.toml");

    AppConfig::default().save_to_file(&path).unwrap();
    assert!(path.exists(), "should create nested directories");
}

#[test]
fn config_load_nonexistent_file_returns_error() {
    let dir = TempDir::new().unwrap();
    let result = AppConfig::load_from_file(&dir.path().join("missing.toml"));
    assert!(result.is_err(), "loading nonexistent file should fail");
}

#[test]
fn config_load_invalid_toml_returns_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("invalid.toml");
    std::fs::write(&path, "this is not valid {{ toml }}").unwrap();

    let result = AppConfig::load_from_file(&path);
    assert!(result.is_err(), "loading invalid TOML should fail");
}

// ---- ConfigHandle async access ----

#[tokio::test]
async fn config_handle_write_updates_values() {
    let handle = ConfigHandle::new(AppConfig::default());

    {
        let mut config = handle.write().await;
        config.display.note_preview_chars = 5;
    }

    let config = handle.read().await;
    assert_eq!(config.display.note_preview_chars, 5);
}

#[tokio::test]
async fn config_handle_clone_shares_state() {
    let handle1 = ConfigHandle::new(AppConfig::default());
    let handle2 = handle1.clone();

    {
        let mut config = handle1.write().await;
        config.logging.level = "trace".into();
    }

    let config = handle2.read().await;
    assert_eq!(
        config.logging.level, "trace",
        "cloned ConfigHandle should share the same underlying state"
    );
}

#[tokio::test]
async fn config_handle_save_to_writes_current_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data").join("config.toml");
    let handle = ConfigHandle::new(AppConfig::default());

    handle.write().await.display.show_timestamps = false;
    handle.save_to(&path).await.unwrap();

    let loaded = AppConfig::load_or_default(&path).unwrap();
    assert!(!loaded.display.show_timestamps);
}

// ---- Effective paths ----

#[test]
fn effective_db_path_uses_custom_when_set() {
    let mut config = AppConfig::default();
    config.database.path = "/custom/path/my.db".into();
    let path = config.effective_db_path().unwrap();
    assert_eq!(path, std::path::PathBuf::from("/custom/path/my.db"));
}

#[test]
fn effective_db_path_defaults_to_data_dir() {
    let config = AppConfig::default();
    let path = config.effective_db_path().unwrap();
    assert!(path.ends_with("data/list_app.db"), "unexpected default: {}", path.display());
}

#[test]
fn effective_log_dir_defaults_to_data_logs() {
    let config = AppConfig::default();
    let dir = config.effective_log_dir().unwrap();
    assert!(dir.ends_with("data/logs"), "unexpected default: {}", dir.display());
}

#[test]
fn configured_db_path_opens_store() {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.database.path = dir.path().join("lists.db").to_string_lossy().into_owned();
    config.database.wal_mode = false;

    let store = ListStore::open(&config.effective_db_path().unwrap(), &config.database).unwrap();
    store.create_list("From config", "").unwrap();
    assert!(dir.path().join("lists.db").exists());
}
