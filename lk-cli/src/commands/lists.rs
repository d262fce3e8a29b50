//! List commands for scripting: print lists and items without the
//! interactive pages.

use clap::Subcommand;
use console::style;

use lk_core::config::ConfigHandle;
use lk_core::constants::messages;
use lk_core::error::{LmError, LmResult};
use lk_models::List;
use lk_services::{ListStore, ListSummary};

use crate::render;
use crate::OutputFormat;

#[derive(Subcommand)]
pub enum ListsAction {
    /// List all lists, newest first.
    List,
    /// Search lists by title or note (case-insensitive).
    Search {
        /// Search query.
        query: String,
    },
    /// Show one list and its items.
    Show {
        /// List id.
        id: i64,
    },
}

pub async fn run(config: ConfigHandle, action: ListsAction, format: OutputFormat) -> LmResult<()> {
    let store = super::open_store(&config).await?;
    let display = config.read().await.display.clone();

    match action {
        ListsAction::List => {
            let lists = summarize(&store, store.get_all_lists()?)?;
            print_lists(&lists, None, format, &display)?;
        }
        ListsAction::Search { query } => {
            let lists = summarize(&store, store.search_lists(&query)?)?;
            print_lists(&lists, Some(&query), format, &display)?;
        }
        ListsAction::Show { id } => {
            let list = store
                .get_list_by_id(id)?
                .ok_or_else(|| LmError::list_not_found(id))?;
            let items = store.get_items_for_list(id)?;

            match format {
                OutputFormat::Json => {
                    let json = serde_json::json!({
                        "list": list,
                        "items": items,
                    });
                    println!("{}", serde_json::to_string_pretty(&json)?);
                }
                OutputFormat::Text => {
                    println!("{}", style(&list.title).bold().underlined());
                    if let Some(note) = list.note.as_deref() {
                        println!("  {note}");
                    }
                    println!(
                        "  Created {}",
                        render::format_timestamp(&list.created_at, &display)
                    );
                    println!();
                    if items.is_empty() {
                        println!("{}", messages::NO_ITEMS);
                    } else {
                        println!("{}", render::items_table(&items, None, &display));
                    }
                }
            }
        }
    }

    Ok(())
}

fn summarize(store: &ListStore, lists: Vec<List>) -> LmResult<Vec<ListSummary>> {
    let counts = store.item_counts()?;
    Ok(lists
        .into_iter()
        .map(|list| ListSummary {
            item_count: counts.get(&list.id).copied().unwrap_or(0),
            list,
        })
        .collect())
}

fn print_lists(
    lists: &[ListSummary],
    query: Option<&str>,
    format: OutputFormat,
    display: &lk_core::config::DisplayConfig,
) -> LmResult<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(lists)?);
        }
        OutputFormat::Text => {
            if lists.is_empty() {
                match query {
                    Some(q) => println!("No lists found matching '{q}'."),
                    None => println!("No lists found."),
                }
            } else {
                println!("{}", render::lists_table(lists, display));
                println!("{} list(s)", lists.len());
            }
        }
    }
    Ok(())
}
