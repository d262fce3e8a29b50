//! ListKeeper CLI - terminal client for managing lists and their items.
//!
//! Running without a subcommand opens the interactive pages (Home, list
//! form, list detail). The `lists`, `db` and `config` subcommands cover
//! scripting and maintenance.

mod commands;
mod prompt;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use lk_core::config::{AppConfig, ConfigHandle};
use lk_core::error::LmResult;
use lk_core::logging;

/// ListKeeper - keep named lists of things.
#[derive(Parser)]
#[command(
    name = "listkeeper",
    version,
    about = "Create, browse and edit lists from the terminal",
    long_about = "A terminal list manager.\n\
                  Lists and their items are stored in data/list_app.db under the working directory."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Path to the database file (overrides config).
    #[arg(long, global = true)]
    db: Option<String>,

    /// Enable verbose logging (debug level, also echoed to stderr).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive list manager (default).
    Ui,
    /// Print lists and their items.
    Lists {
        #[command(subcommand)]
        action: commands::lists::ListsAction,
    },
    /// Database management commands.
    Db {
        #[command(subcommand)]
        action: commands::db::DbAction,
    },
    /// Show or create the configuration file.
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main]
async fn main() -> LmResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config_path = match cli.config.as_deref() {
        Some(path) => PathBuf::from(path),
        None => AppConfig::default_config_path()?,
    };
    let mut config = AppConfig::load_or_default(&config_path)?;
    if let Some(db) = cli.db {
        config.database.path = db;
    }

    let command = cli.command.unwrap_or(Commands::Ui);

    // Initialize logging. Pages own the terminal, so the interactive UI only
    // ever logs to file.
    let log_level = if cli.verbose {
        "debug".to_string()
    } else {
        config.logging.level.clone()
    };
    let console = cli.verbose && !matches!(command, Commands::Ui);
    let log_dir = config.effective_log_dir()?;
    let _guard = logging::init_logging(&log_level, &log_dir, config.logging.json_output, console)?;

    info!("{} v{}", lk_core::constants::APP_NAME, lk_core::constants::APP_VERSION);

    let config_handle = ConfigHandle::new(config);

    // Dispatch to command handlers
    match command {
        Commands::Ui => commands::ui::run(config_handle).await,
        Commands::Lists { action } => commands::lists::run(config_handle, action, cli.format).await,
        Commands::Db { action } => commands::db::run(config_handle, action, cli.format).await,
        Commands::Config { action } => {
            commands::config::run(config_handle, &config_path, action, cli.format).await
        }
    }
}
