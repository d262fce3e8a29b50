//! Page payloads produced by the controller for a renderer.

use serde::Serialize;

use lk_models::{Item, ItemId, List};

use crate::navigation::{NavState, Notice};

/// A list together with how many items it holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListSummary {
    #[serde(flatten)]
    pub list: List,
    pub item_count: i64,
}

/// Everything a renderer needs to draw one page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum PageView {
    Home {
        query: Option<String>,
        lists: Vec<ListSummary>,
    },
    ListForm {
        /// `None` for the create form.
        existing: Option<List>,
    },
    ListDetail {
        list: List,
        items: Vec<Item>,
        editing_item: Option<ItemId>,
    },
}

impl PageView {
    pub fn title(&self) -> String {
        match self {
            PageView::Home { .. } => "My Lists".to_string(),
            PageView::ListForm { existing: None } => "Create New List".to_string(),
            PageView::ListForm { existing: Some(list) } => format!("Edit List: {}", list.title),
            PageView::ListDetail { list, .. } => list.title.clone(),
        }
    }

    /// The item currently in edit mode, if it is on this page.
    pub fn editing(&self) -> Option<&Item> {
        match self {
            PageView::ListDetail {
                items,
                editing_item: Some(id),
                ..
            } => items.iter().find(|item| item.id == *id),
            _ => None,
        }
    }
}

/// A loaded page: the state it was loaded for, its data, and an optional
/// message to show above it.
///
/// `state` can differ from the requested state when loading redirected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub state: NavState,
    pub page: PageView,
    pub notice: Option<Notice>,
}
