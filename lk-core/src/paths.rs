//! Storage locations relative to the working directory.
//!
//! ListKeeper keeps its database, configuration and logs under a `data/`
//! directory next to where it is launched, so a checkout or a copied folder
//! carries its own lists.

use std::path::PathBuf;

use crate::constants::{CONFIG_FILE_NAME, DATA_DIR_NAME, DB_FILE_NAME, LOG_DIR_NAME};
use crate::error::{LmError, LmResult};

/// Root directory for all persisted state: `<cwd>/data`.
pub fn data_dir() -> LmResult<PathBuf> {
    let cwd = std::env::current_dir()
        .map_err(|e| LmError::Config(format!("could not determine working directory: {e}")))?;
    Ok(cwd.join(DATA_DIR_NAME))
}

/// Default SQLite database file: `<cwd>/data/list_app.db`.
pub fn default_db_path() -> LmResult<PathBuf> {
    Ok(data_dir()?.join(DB_FILE_NAME))
}

/// Default configuration file: `<cwd>/data/config.toml`.
pub fn default_config_path() -> LmResult<PathBuf> {
    Ok(data_dir()?.join(CONFIG_FILE_NAME))
}

/// Default log directory: `<cwd>/data/logs`.
pub fn default_log_dir() -> LmResult<PathBuf> {
    Ok(data_dir()?.join(LOG_DIR_NAME))
}
