//! ListKeeper Core - Foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by all other ListKeeper crates:
//! - Application configuration (storage location, logging, display settings)
//! - Global error type covering storage, domain, and configuration failures
//! - Structured logging with tracing
//! - Working-directory relative path resolution
//! - Common constants

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;
pub mod constants;

// Re-export commonly used items at the crate root
pub use config::AppConfig;
pub use error::{LmError, LmResult};
pub use logging::init_logging;
