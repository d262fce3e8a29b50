//! Configuration commands.

use std::path::Path;

use clap::Subcommand;
use console::style;

use lk_core::config::ConfigHandle;
use lk_core::error::{LmError, LmResult};
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration.
    Show,
    /// Write the current configuration to the config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

pub async fn run(
    config: ConfigHandle,
    config_path: &Path,
    action: ConfigAction,
    format: OutputFormat,
) -> LmResult<()> {
    match action {
        ConfigAction::Show => {
            let cfg = config.read().await;
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&*cfg)?);
                }
                OutputFormat::Text => {
                    println!("# {}", config_path.display());
                    let text = toml::to_string_pretty(&*cfg)
                        .map_err(|e| LmError::Config(format!("failed to serialize config: {e}")))?;
                    println!("{text}");
                }
            }
        }
        ConfigAction::Init { force } => {
            if config_path.exists() && !force {
                println!(
                    "  {} {} already exists (use --force to overwrite).",
                    style("SKIP").yellow().bold(),
                    config_path.display()
                );
                return Ok(());
            }
            config.save_to(config_path).await?;
            println!(
                "  {} Wrote {}",
                style("OK").green().bold(),
                config_path.display()
            );
        }
    }

    Ok(())
}
