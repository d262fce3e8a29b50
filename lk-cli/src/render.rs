//! Text rendering of pages and notices.
//!
//! Everything here is a pure function from page data to a `String`; the
//! interactive loop decides when to clear the terminal and print.

use std::fmt::Write;

use chrono::{DateTime, Local, Utc};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use console::style;

use lk_core::config::DisplayConfig;
use lk_core::constants::messages;
use lk_models::{Item, ItemId, List};
use lk_services::{ListSummary, Notice, NoticeLevel, PageView, Screen};

use crate::commands::truncate;

/// Render a whole screen: pending notices first, then the page.
pub fn render_screen(screen: &Screen, notices: &[Notice], display: &DisplayConfig) -> String {
    let mut out = String::new();

    for notice in notices {
        let _ = writeln!(out, "{}", render_notice(notice));
    }
    if !notices.is_empty() {
        out.push('\n');
    }

    out.push_str(&render_page(&screen.page, display));
    out
}

/// One notice line with a colored tag.
pub fn render_notice(notice: &Notice) -> String {
    let tag = match notice.level {
        NoticeLevel::Success => style("OK").green().bold(),
        NoticeLevel::Info => style("INFO").cyan().bold(),
        NoticeLevel::Error => style("ERROR").red().bold(),
    };
    format!("  {tag} {}", notice.text)
}

pub fn render_page(page: &PageView, display: &DisplayConfig) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", style(page.title()).bold().underlined());
    out.push('\n');

    match page {
        PageView::Home { query, lists } => {
            if let Some(q) = query {
                let _ = writeln!(out, "  Search: {}", style(q).cyan());
                out.push('\n');
            }
            if lists.is_empty() {
                let empty = match query {
                    Some(q) => format!("No lists found matching '{q}'."),
                    None => messages::NO_LISTS.to_string(),
                };
                let _ = writeln!(out, "  {}", style(empty).dim());
            } else {
                let _ = writeln!(out, "{}", lists_table(lists, display));
            }
        }
        PageView::ListForm { existing } => match existing {
            Some(list) => {
                let _ = writeln!(out, "  Editing '{}'.", list.title);
                let _ = writeln!(out, "  Note: {}", or_dash(list.note_text()));
            }
            None => {
                let _ = writeln!(out, "  Enter a title (required) and an optional note.");
            }
        },
        PageView::ListDetail {
            list,
            items,
            editing_item,
        } => {
            out.push_str(&list_header(list, display));
            out.push('\n');
            if items.is_empty() {
                let _ = writeln!(out, "  {}", style(messages::NO_ITEMS).dim());
            } else {
                let _ = writeln!(out, "{}", items_table(items, *editing_item, display));
            }
        }
    }

    out
}

/// Home page table: title, note preview, item count and creation time.
pub fn lists_table(lists: &[ListSummary], display: &DisplayConfig) -> Table {
    let mut table = new_table();

    let mut header = vec!["#", "Title", "Note", "Items"];
    if display.show_timestamps {
        header.push("Created");
    }
    table.set_header(header);

    for (i, summary) in lists.iter().enumerate() {
        let mut row = vec![
            (i + 1).to_string(),
            summary.list.title.clone(),
            truncate(summary.list.note_text(), display.note_preview_chars),
            summary.item_count.to_string(),
        ];
        if display.show_timestamps {
            row.push(format_timestamp(&summary.list.created_at, display));
        }
        table.add_row(row);
    }

    table
}

/// Detail page table. The item in edit mode is flagged.
pub fn items_table(items: &[Item], editing: Option<ItemId>, display: &DisplayConfig) -> Table {
    let mut table = new_table();

    let mut header = vec!["#", "Name", "Address", "Notes"];
    if display.show_timestamps {
        header.push("Added");
    }
    table.set_header(header);

    for (i, item) in items.iter().enumerate() {
        let name = if editing == Some(item.id) {
            format!("{} (editing)", item.name)
        } else {
            item.name.clone()
        };
        let mut row = vec![
            (i + 1).to_string(),
            name,
            or_dash(item.address_text()).to_string(),
            or_dash(item.notes_text()).to_string(),
        ];
        if display.show_timestamps {
            row.push(format_timestamp(&item.created_at, display));
        }
        table.add_row(row);
    }

    table
}

fn list_header(list: &List, display: &DisplayConfig) -> String {
    let mut out = String::new();
    if let Some(note) = list.note.as_deref() {
        let _ = writeln!(out, "  {}", note);
    }
    if display.show_timestamps {
        let _ = writeln!(
            out,
            "  {}",
            style(format!("Created {}", format_timestamp(&list.created_at, display))).dim()
        );
    }
    out
}

/// Format a stored UTC timestamp in local time.
pub fn format_timestamp(ts: &DateTime<Utc>, display: &DisplayConfig) -> String {
    ts.with_timezone(&Local)
        .format(&display.timestamp_format)
        .to_string()
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn list(id: i64, title: &str, note: Option<&str>) -> List {
        List {
            id,
            title: title.to_string(),
            note: note.map(str::to_string),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
        }
    }

    fn item(id: i64, name: &str) -> Item {
        Item {
            id,
            list_id: 1,
            name: name.to_string(),
            address: None,
            notes: Some("2%".to_string()),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 31, 0).unwrap(),
        }
    }

    #[test]
    fn test_empty_home_shows_hint() {
        let page = PageView::Home {
            query: None,
            lists: vec![],
        };
        let out = render_page(&page, &DisplayConfig::default());
        assert!(out.contains("My Lists"));
        assert!(out.contains(messages::NO_LISTS));
    }

    #[test]
    fn test_empty_search_mentions_query() {
        let page = PageView::Home {
            query: Some("zebra".into()),
            lists: vec![],
        };
        let out = render_page(&page, &DisplayConfig::default());
        assert!(out.contains("No lists found matching 'zebra'."));
    }

    #[test]
    fn test_home_table_truncates_note_preview() {
        let display = DisplayConfig {
            note_preview_chars: 10,
            ..DisplayConfig::default()
        };
        let lists = vec![ListSummary {
            list: list(1, "Groceries", Some("remember the reusable bags")),
            item_count: 2,
        }];
        let out = lists_table(&lists, &display).to_string();
        assert!(out.contains("Groceries"));
        assert!(out.contains("remembe..."));
        assert!(!out.contains("reusable"));
    }

    #[test]
    fn test_timestamps_can_be_hidden() {
        let display = DisplayConfig {
            show_timestamps: false,
            ..DisplayConfig::default()
        };
        let lists = vec![ListSummary {
            list: list(1, "Trip", None),
            item_count: 0,
        }];
        let out = lists_table(&lists, &display).to_string();
        assert!(!out.contains("Created"));
        assert!(!out.contains("2024"));
    }

    #[test]
    fn test_detail_marks_editing_item() {
        let page = PageView::ListDetail {
            list: list(1, "Groceries", Some("weekly")),
            items: vec![item(10, "Milk"), item(11, "Eggs")],
            editing_item: Some(11),
        };
        let out = render_page(&page, &DisplayConfig::default());
        assert!(out.contains("weekly"));
        assert!(out.contains("Eggs (editing)"));
        assert!(!out.contains("Milk (editing)"));
    }

    #[test]
    fn test_detail_without_items_shows_hint() {
        let page = PageView::ListDetail {
            list: list(1, "Trip", None),
            items: vec![],
            editing_item: None,
        };
        let out = render_page(&page, &DisplayConfig::default());
        assert!(out.contains(messages::NO_ITEMS));
    }

    #[test]
    fn test_notices_render_before_page() {
        let screen = Screen {
            state: lk_services::NavState::home(),
            page: PageView::Home {
                query: None,
                lists: vec![],
            },
            notice: None,
        };
        let notices = vec![Notice::success("List 'Trip' deleted.")];
        let out = render_screen(&screen, &notices, &DisplayConfig::default());
        let notice_at = out.find("List 'Trip' deleted.").unwrap();
        let title_at = out.find("My Lists").unwrap();
        assert!(notice_at < title_at);
    }
}
