//! Database management commands.

use clap::Subcommand;
use comfy_table::{Table, presets::UTF8_FULL, modifiers::UTF8_ROUND_CORNERS, ContentArrangement};
use console::style;
use dialoguer::Confirm;

use lk_core::config::ConfigHandle;
use lk_core::error::{LmError, LmResult};
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum DbAction {
    /// Show database statistics.
    Stats,
    /// Run an integrity check.
    Check,
    /// Reset the database (WARNING: destroys all lists and items).
    Reset {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Show the database file path.
    Path,
}

pub async fn run(config: ConfigHandle, action: DbAction, format: OutputFormat) -> LmResult<()> {
    let db_path = config.read().await.effective_db_path()?;

    match action {
        DbAction::Stats => {
            let store = super::open_store(&config).await?;
            let stats = store.stats()?;

            let file_size = std::fs::metadata(&db_path).ok().map(|m| m.len());

            // Get WAL file size if it exists
            let wal_path = db_path.with_extension("db-wal");
            let wal_size = std::fs::metadata(&wal_path).ok().map(|m| m.len());

            let conn = store.database().conn()?;
            let journal_mode: String = conn
                .query_row("PRAGMA journal_mode", [], |row| row.get(0))
                .unwrap_or_else(|_| "unknown".to_string());
            let schema_version = lk_models::migrations::get_schema_version(&conn)?;

            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({
                        "path": db_path.display().to_string(),
                        "tables": stats,
                        "schema_version": schema_version,
                        "file_size_bytes": file_size,
                        "wal_size_bytes": wal_size,
                        "journal_mode": journal_mode,
                    }));
                }
                OutputFormat::Text => {
                    println!("{}", style("Database Statistics").bold().underlined());
                    println!("  Path:          {}", db_path.display());
                    println!("  Journal mode:  {}", journal_mode);
                    println!("  Schema:        v{}", schema_version);
                    println!();

                    let mut table = Table::new();
                    table
                        .load_preset(UTF8_FULL)
                        .apply_modifier(UTF8_ROUND_CORNERS)
                        .set_content_arrangement(ContentArrangement::Dynamic);

                    table.set_header(vec!["Table", "Row Count"]);
                    table.add_row(vec!["lists".to_string(), stats.lists.to_string()]);
                    table.add_row(vec!["items".to_string(), stats.items.to_string()]);
                    println!("{table}");

                    println!();
                    println!("{}", style("Storage").bold().underlined());
                    if let Some(size) = file_size {
                        println!("  Database:      {}", super::format_bytes(size));
                    }
                    if let Some(size) = wal_size {
                        println!("  WAL file:      {}", super::format_bytes(size));
                    }
                }
            }
        }
        DbAction::Check => {
            println!("  {} Running integrity check...", style("...").dim());
            let store = super::open_store(&config).await?;
            let db = store.database();

            let integrity = db.run_integrity_check();
            match &integrity {
                Ok(()) => {
                    println!("  {} Integrity check passed.", style("OK").green().bold());
                }
                Err(e) => {
                    println!("  {} Integrity check failed: {}", style("FAIL").red().bold(), e);
                }
            }

            // Items pointing at a missing list
            let fk_violations = db.foreign_key_violations()?;
            if fk_violations.is_empty() {
                println!("  {} Foreign key constraints OK.", style("OK").green().bold());
            } else {
                println!(
                    "  {} {} foreign key violation(s):",
                    style("WARN").yellow().bold(),
                    fk_violations.len()
                );
                for v in fk_violations.iter().take(10) {
                    println!("    - {v}");
                }
                if fk_violations.len() > 10 {
                    println!("    ... and {} more", fk_violations.len() - 10);
                }
            }

            integrity?;
        }
        DbAction::Reset { yes } => {
            println!(
                "  {} This will delete ALL lists and items.",
                style("WARNING").red().bold()
            );
            println!("  Database: {}", db_path.display());

            let confirmed = yes
                || Confirm::new()
                    .with_prompt("  Are you sure you want to reset the database?")
                    .default(false)
                    .interact()
                    .map_err(|e| LmError::Internal(e.to_string()))?;

            if !confirmed {
                println!("  Reset cancelled.");
                return Ok(());
            }

            let store = super::open_store(&config).await?;
            store.database().reset()?;
            println!("  {} Database reset complete.", style("OK").green().bold());
        }
        DbAction::Path => {
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::json!({"path": db_path.display().to_string()}));
                }
                OutputFormat::Text => {
                    println!("{}", db_path.display());
                }
            }
        }
    }

    Ok(())
}
