//! Global error types for the ListKeeper application.
//!
//! Storage, domain, and configuration failures are unified into a single
//! `LmError` enum with conversions from underlying library errors.

use thiserror::Error;

/// Convenience type alias for Results using LmError.
pub type LmResult<T> = Result<T, LmError>;

/// Kind of record an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    List,
    Item,
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::List => write!(f, "list"),
            Entity::Item => write!(f, "item"),
        }
    }
}

/// Unified error type covering all error categories in ListKeeper.
#[derive(Error, Debug)]
pub enum LmError {
    // -- Configuration errors --
    /// Failed to load or parse application configuration.
    #[error("configuration error: {0}")]
    Config(String),

    // -- Database errors --
    /// SQLite database error.
    #[error("database error: {0}")]
    Database(String),

    /// Database migration failed.
    #[error("migration error: {0}")]
    Migration(String),

    /// Database connection pool error.
    #[error("connection pool error: {0}")]
    Pool(String),

    /// Database integrity check failed.
    #[error("database integrity check failed: {0}")]
    IntegrityCheck(String),

    // -- Domain errors --
    /// A required field was empty.
    #[error("{message}")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
        /// Message shown to the user.
        message: String,
    },

    /// A referenced list or item does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Which table was consulted.
        entity: Entity,
        /// The id that was looked up.
        id: i64,
    },

    /// An item referenced a list that does not exist.
    #[error("list {list_id} does not exist; item was not saved")]
    Referential {
        /// The missing parent list id.
        list_id: i64,
    },

    // -- File/IO errors --
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    // -- Generic --
    /// An unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),

    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LmError {
    /// Build a validation error for an empty required field.
    pub fn required(field: &'static str, message: impl Into<String>) -> Self {
        LmError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Shorthand for a missing list.
    pub fn list_not_found(id: i64) -> Self {
        LmError::NotFound {
            entity: Entity::List,
            id,
        }
    }

    /// Shorthand for a missing item.
    pub fn item_not_found(id: i64) -> Self {
        LmError::NotFound {
            entity: Entity::Item,
            id,
        }
    }

    /// Whether this error reports a missing record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LmError::NotFound { .. })
    }

    /// Domain errors are caused by user input or stale navigation and are
    /// shown as plain messages; everything else is an operational failure.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            LmError::Validation { .. } | LmError::NotFound { .. } | LmError::Referential { .. }
        )
    }
}

impl From<serde_json::Error> for LmError {
    fn from(e: serde_json::Error) -> Self {
        LmError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for LmError {
    fn from(e: toml::de::Error) -> Self {
        LmError::Config(e.to_string())
    }
}
