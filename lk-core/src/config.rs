//! Application configuration management.
//!
//! Handles loading, saving, and accessing application configuration:
//! storage location, connection settings, logging, and display preferences.
//! Configuration is persisted as TOML on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_NOTE_PREVIEW_CHARS;
use crate::error::{LmError, LmResult};
use crate::paths;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Page rendering settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file. If empty, uses `data/list_app.db`.
    #[serde(default)]
    pub path: String,

    /// Enable WAL (Write-Ahead Logging) mode.
    #[serde(default = "default_true")]
    pub wal_mode: bool,

    /// Maximum number of connections in the pool.
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,

    /// Run integrity check on startup.
    #[serde(default = "default_true")]
    pub integrity_check_on_startup: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses `data/logs`.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output.
    #[serde(default)]
    pub json_output: bool,
}

/// How pages are rendered in the terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Characters of a list note shown on the home page before "...".
    #[serde(default = "default_note_preview_chars")]
    pub note_preview_chars: usize,

    /// chrono format string for creation timestamps.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,

    /// Show creation timestamps next to lists and items.
    #[serde(default = "default_true")]
    pub show_timestamps: bool,

    /// Ask for confirmation before deleting a list or an item.
    #[serde(default = "default_true")]
    pub confirm_deletes: bool,
}

// Default value functions for serde

fn default_true() -> bool {
    true
}

fn default_pool_size() -> u32 {
    4
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_note_preview_chars() -> usize {
    DEFAULT_NOTE_PREVIEW_CHARS
}

fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: String::new(),
            wal_mode: true,
            pool_size: default_pool_size(),
            integrity_check_on_startup: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            note_preview_chars: default_note_preview_chars(),
            timestamp_format: default_timestamp_format(),
            show_timestamps: true,
            confirm_deletes: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist yet.
    pub fn load_or_default(path: &Path) -> LmResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> LmResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> LmResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| LmError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> LmResult<PathBuf> {
        paths::default_config_path()
    }

    /// Get the effective database path, using the configured path or the default.
    pub fn effective_db_path(&self) -> LmResult<PathBuf> {
        if self.database.path.is_empty() {
            paths::default_db_path()
        } else {
            Ok(PathBuf::from(&self.database.path))
        }
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> LmResult<PathBuf> {
        if self.logging.directory.is_empty() {
            paths::default_log_dir()
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }
}

/// Shared configuration holder for the binary's command handlers.
#[derive(Clone)]
pub struct ConfigHandle {
    inner: Arc<RwLock<AppConfig>>,
}

impl ConfigHandle {
    /// Create a new configuration handle.
    pub fn new(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Read the configuration.
    pub async fn read(&self) -> tokio::sync::RwLockReadGuard<'_, AppConfig> {
        self.inner.read().await
    }

    /// Write/update the configuration.
    pub async fn write(&self) -> tokio::sync::RwLockWriteGuard<'_, AppConfig> {
        self.inner.write().await
    }

    /// Save the current configuration to `path`.
    pub async fn save_to(&self, path: &Path) -> LmResult<()> {
        let config = self.inner.read().await;
        config.save_to_file(path)
    }
}
