//! Interactive input for the page loop.
//!
//! `actions_for` decides what the user may do on a page; `next_choice`
//! asks which one and collects any form fields, turning the answer into an
//! `Event` for the controller. Field validation is left to the navigation
//! state machine so that blank input produces the same messages everywhere.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use lk_core::config::DisplayConfig;
use lk_core::error::{LmError, LmResult};
use lk_models::{Item, List};
use lk_services::{Event, ItemDraft, ListDraft, PageView};

/// A menu entry on some page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Search,
    ClearSearch,
    CreateNew,
    Open,
    EditInfo,
    DeleteList,
    SubmitList,
    AddItem,
    EditItem,
    SaveItem,
    CancelEdit,
    DeleteItem,
    Back,
    Quit,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::Search => "Search lists",
            Action::ClearSearch => "Clear search",
            Action::CreateNew => "Create new list",
            Action::Open => "Open a list",
            Action::EditInfo => "Edit list info",
            Action::DeleteList => "Delete a list",
            Action::SubmitList => "Fill in and save",
            Action::AddItem => "Add item",
            Action::EditItem => "Edit an item",
            Action::SaveItem => "Save edited item",
            Action::CancelEdit => "Cancel editing",
            Action::DeleteItem => "Delete an item",
            Action::Back => "Back to lists",
            Action::Quit => "Quit",
        }
    }
}

/// What the loop should do next.
#[derive(Debug)]
pub enum Choice {
    Event(Event),
    /// Redraw the same page (e.g. a delete was not confirmed).
    Stay,
    Quit,
}

/// Actions offered on `page`, in menu order.
pub fn actions_for(page: &PageView) -> Vec<Action> {
    let mut actions = Vec::new();
    match page {
        PageView::Home { query, lists } => {
            actions.push(Action::Search);
            if query.is_some() {
                actions.push(Action::ClearSearch);
            }
            actions.push(Action::CreateNew);
            if !lists.is_empty() {
                actions.extend([Action::Open, Action::EditInfo, Action::DeleteList]);
            }
            actions.push(Action::Quit);
        }
        PageView::ListForm { .. } => {
            actions.extend([Action::SubmitList, Action::Back]);
        }
        PageView::ListDetail {
            items,
            editing_item,
            ..
        } => {
            if editing_item.is_some() {
                actions.extend([Action::SaveItem, Action::CancelEdit]);
            }
            actions.push(Action::AddItem);
            if !items.is_empty() {
                actions.extend([Action::EditItem, Action::DeleteItem]);
            }
            actions.extend([Action::Back, Action::Quit]);
        }
    }
    actions
}

/// Ask the user for the next action on `page`.
pub fn next_choice(page: &PageView, display: &DisplayConfig) -> LmResult<Choice> {
    let actions = actions_for(page);
    let labels: Vec<&str> = actions.iter().map(Action::label).collect();

    let selected = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("What next?")
        .items(&labels)
        .default(0)
        .interact_opt()
        .map_err(ui_err)?;

    // Escape leaves the page: quits from Home, goes back elsewhere.
    let Some(index) = selected else {
        return Ok(match page {
            PageView::Home { .. } => Choice::Quit,
            _ => Choice::Event(Event::Back),
        });
    };

    choose(actions[index], page, display)
}

fn choose(action: Action, page: &PageView, display: &DisplayConfig) -> LmResult<Choice> {
    let event = match (action, page) {
        (Action::Quit, _) => return Ok(Choice::Quit),
        (Action::Back, _) => Event::Back,

        (Action::Search, PageView::Home { query, .. }) => {
            Event::Search(text("Search", query.as_deref().unwrap_or(""))?)
        }
        (Action::ClearSearch, _) => Event::Search(String::new()),
        (Action::CreateNew, _) => Event::CreateNew,
        (Action::Open, PageView::Home { lists, .. }) => {
            let lists: Vec<&List> = lists.iter().map(|s| &s.list).collect();
            match pick_list("Open which list?", &lists)? {
                Some(list) => Event::Select(list.id),
                None => return Ok(Choice::Stay),
            }
        }
        (Action::EditInfo, PageView::Home { lists, .. }) => {
            let lists: Vec<&List> = lists.iter().map(|s| &s.list).collect();
            match pick_list("Edit which list?", &lists)? {
                Some(list) => Event::EditInfo(list.id),
                None => return Ok(Choice::Stay),
            }
        }
        (Action::DeleteList, PageView::Home { lists, .. }) => {
            let lists: Vec<&List> = lists.iter().map(|s| &s.list).collect();
            let Some(list) = pick_list("Delete which list?", &lists)? else {
                return Ok(Choice::Stay);
            };
            let prompt = format!("Delete '{}' and all of its items?", list.title);
            if !confirm(&prompt, display)? {
                return Ok(Choice::Stay);
            }
            Event::DeleteList(list.id)
        }

        (Action::SubmitList, PageView::ListForm { existing }) => {
            let (title, note) = match existing {
                Some(list) => (list.title.as_str(), list.note_text()),
                None => ("", ""),
            };
            Event::SubmitList(ListDraft::new(
                text("List title", title)?,
                text("Note (optional)", note)?,
            ))
        }

        (Action::AddItem, PageView::ListDetail { .. }) => {
            Event::AddItem(item_form(None)?)
        }
        (Action::EditItem, PageView::ListDetail { items, .. }) => {
            match pick_item("Edit which item?", items)? {
                Some(item) => Event::EditItem(item.id),
                None => return Ok(Choice::Stay),
            }
        }
        (Action::SaveItem, PageView::ListDetail { .. }) => match page.editing() {
            Some(item) => Event::SaveItem {
                id: item.id,
                draft: item_form(Some(item))?,
            },
            None => return Ok(Choice::Stay),
        },
        (Action::CancelEdit, _) => Event::CancelEdit,
        (Action::DeleteItem, PageView::ListDetail { items, .. }) => {
            let Some(item) = pick_item("Delete which item?", items)? else {
                return Ok(Choice::Stay);
            };
            if !confirm(&format!("Delete item '{}'?", item.name), display)? {
                return Ok(Choice::Stay);
            }
            Event::DeleteItem(item.id)
        }

        // Not offered on this page.
        _ => return Ok(Choice::Stay),
    };

    Ok(Choice::Event(event))
}

fn item_form(existing: Option<&Item>) -> LmResult<ItemDraft> {
    let (name, address, notes) = match existing {
        Some(item) => (item.name.as_str(), item.address_text(), item.notes_text()),
        None => ("", "", ""),
    };
    Ok(ItemDraft::new(
        text("Item name", name)?,
        text("Address (optional)", address)?,
        text("Notes (optional)", notes)?,
    ))
}

fn pick_list<'a>(prompt: &str, lists: &[&'a List]) -> LmResult<Option<&'a List>> {
    let labels: Vec<&str> = lists.iter().map(|l| l.title.as_str()).collect();
    Ok(pick(prompt, &labels)?.map(|i| lists[i]))
}

fn pick_item<'a>(prompt: &str, items: &'a [Item]) -> LmResult<Option<&'a Item>> {
    let labels: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    Ok(pick(prompt, &labels)?.map(|i| &items[i]))
}

fn pick(prompt: &str, labels: &[&str]) -> LmResult<Option<usize>> {
    Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(labels)
        .default(0)
        .interact_opt()
        .map_err(ui_err)
}

fn text(prompt: &str, initial: &str) -> LmResult<String> {
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .map_err(ui_err)
}

fn confirm(prompt: &str, display: &DisplayConfig) -> LmResult<bool> {
    if !display.confirm_deletes {
        return Ok(true);
    }
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(ui_err)
}

fn ui_err(e: dialoguer::Error) -> LmError {
    LmError::Internal(format!("terminal input failed: {e}"))
}
