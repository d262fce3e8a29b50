//! Page navigation as a pure state machine.
//!
//! The current page and its selection live in an immutable [`NavState`].
//! [`apply`] maps a state and a user [`Event`] to the next state plus at most
//! one storage [`Effect`]; it never touches storage itself. Once the
//! controller has run the effect, [`settle`] folds the [`Outcome`] back into
//! the state, and [`recover`] does the same for a failure.

use serde::Serialize;

use lk_core::constants::messages;
use lk_core::error::{Entity, LmError};
use lk_models::{ItemId, ListId};

/// Which page is shown and what it is focused on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "page", rename_all = "snake_case")]
pub enum NavState {
    /// All lists, optionally filtered by a search query.
    Home { query: Option<String> },
    /// Create form (`editing: None`) or edit form for an existing list.
    ListForm { editing: Option<ListId> },
    /// One list with its items. At most one item is in edit mode.
    ListDetail {
        list_id: ListId,
        editing_item: Option<ItemId>,
    },
}

impl Default for NavState {
    fn default() -> Self {
        Self::home()
    }
}

impl NavState {
    /// Unfiltered home page.
    pub fn home() -> Self {
        NavState::Home { query: None }
    }

    /// Detail page with nothing in edit mode.
    pub fn detail(list_id: ListId) -> Self {
        NavState::ListDetail {
            list_id,
            editing_item: None,
        }
    }

    pub fn page_name(&self) -> &'static str {
        match self {
            NavState::Home { .. } => "home",
            NavState::ListForm { editing: None } => "new list",
            NavState::ListForm { editing: Some(_) } => "edit list",
            NavState::ListDetail { .. } => "list detail",
        }
    }
}

/// Title and note as typed into the list form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDraft {
    pub title: String,
    pub note: String,
}

impl ListDraft {
    pub fn new(title: impl Into<String>, note: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            note: note.into(),
        }
    }
}

/// Name, address and notes as typed into an item form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub address: String,
    pub notes: String,
}

impl ItemDraft {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
            notes: notes.into(),
        }
    }
}

/// A user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    // Home
    Search(String),
    CreateNew,
    EditInfo(ListId),
    Select(ListId),
    DeleteList(ListId),
    // ListForm
    SubmitList(ListDraft),
    // ListDetail
    AddItem(ItemDraft),
    EditItem(ItemId),
    SaveItem { id: ItemId, draft: ItemDraft },
    CancelEdit,
    DeleteItem(ItemId),
    // ListForm and ListDetail
    Back,
}

/// Storage work a transition asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    CreateList(ListDraft),
    UpdateList { id: ListId, draft: ListDraft },
    DeleteList(ListId),
    AddItem { list_id: ListId, draft: ItemDraft },
    UpdateItem { id: ItemId, draft: ItemDraft },
    DeleteItem(ItemId),
}

/// Result of a successfully performed [`Effect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    ListCreated { id: ListId, title: String },
    ListUpdated { id: ListId, title: String },
    ListDeleted { title: String },
    ItemAdded { name: String },
    ItemUpdated { name: String },
    ItemDeleted { name: String },
}

impl Outcome {
    /// Confirmation shown after the effect.
    pub fn notice(&self) -> Notice {
        match self {
            Outcome::ListCreated { title, .. } => {
                Notice::success(format!("List '{title}' created successfully!"))
            }
            Outcome::ListUpdated { title, .. } => {
                Notice::success(format!("List '{title}' updated successfully!"))
            }
            Outcome::ListDeleted { title } => Notice::success(format!("List '{title}' deleted.")),
            Outcome::ItemAdded { name } => Notice::success(format!("Item '{name}' added.")),
            Outcome::ItemUpdated { name } => Notice::success(format!("Item '{name}' updated.")),
            Outcome::ItemDeleted { name } => Notice::success(format!("Item '{name}' deleted.")),
        }
    }
}

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

/// A one-shot message shown above the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Result of [`apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Next state. When `effect` is set this is provisional until settled.
    pub state: NavState,
    pub effect: Option<Effect>,
    pub notice: Option<Notice>,
}

impl Step {
    fn goto(state: NavState) -> Self {
        Self {
            state,
            effect: None,
            notice: None,
        }
    }

    fn perform(state: NavState, effect: Effect) -> Self {
        Self {
            state,
            effect: Some(effect),
            notice: None,
        }
    }

    fn reject(state: &NavState, message: &str) -> Self {
        Self {
            state: state.clone(),
            effect: None,
            notice: Some(Notice::error(message)),
        }
    }
}

/// Compute the next state for `event` without touching storage.
///
/// Events that make no sense on the current page leave the state as it is.
pub fn apply(state: &NavState, event: Event) -> Step {
    match (state, event) {
        // ── Home ──
        (NavState::Home { .. }, Event::Search(query)) => {
            let query = (!is_blank(&query)).then_some(query);
            Step::goto(NavState::Home { query })
        }
        (NavState::Home { .. }, Event::CreateNew) => Step::goto(NavState::ListForm { editing: None }),
        (NavState::Home { .. }, Event::EditInfo(id)) => {
            Step::goto(NavState::ListForm { editing: Some(id) })
        }
        (NavState::Home { .. }, Event::Select(id)) => Step::goto(NavState::detail(id)),
        (NavState::Home { .. }, Event::DeleteList(id)) => {
            Step::perform(state.clone(), Effect::DeleteList(id))
        }

        // ── ListForm ──
        (NavState::ListForm { editing }, Event::SubmitList(draft)) => {
            if is_blank(&draft.title) {
                return Step::reject(state, messages::TITLE_REQUIRED);
            }
            let effect = match editing {
                Some(id) => Effect::UpdateList { id: *id, draft },
                None => Effect::CreateList(draft),
            };
            Step::perform(state.clone(), effect)
        }
        (NavState::ListForm { .. }, Event::Back) => Step::goto(NavState::home()),

        // ── ListDetail ──
        (NavState::ListDetail { list_id, .. }, Event::AddItem(draft)) => {
            if is_blank(&draft.name) {
                return Step::reject(state, messages::ITEM_NAME_REQUIRED);
            }
            Step::perform(
                state.clone(),
                Effect::AddItem {
                    list_id: *list_id,
                    draft,
                },
            )
        }
        (NavState::ListDetail { list_id, .. }, Event::EditItem(item)) => {
            Step::goto(NavState::ListDetail {
                list_id: *list_id,
                editing_item: Some(item),
            })
        }
        (
            NavState::ListDetail {
                list_id,
                editing_item: Some(editing),
            },
            Event::SaveItem { id, draft },
        ) if *editing == id => {
            if is_blank(&draft.name) {
                return Step::reject(state, messages::ITEM_NAME_EMPTY);
            }
            Step::perform(NavState::detail(*list_id), Effect::UpdateItem { id, draft })
        }
        (NavState::ListDetail { list_id, .. }, Event::CancelEdit) => {
            Step::goto(NavState::detail(*list_id))
        }
        (NavState::ListDetail { list_id, .. }, Event::DeleteItem(id)) => {
            Step::perform(NavState::detail(*list_id), Effect::DeleteItem(id))
        }
        (NavState::ListDetail { .. }, Event::Back) => Step::goto(NavState::home()),

        (_, _) => Step::goto(state.clone()),
    }
}

/// Fold a performed effect's outcome into the provisional state.
///
/// A submitted list form moves to the detail page of the affected list; all
/// other outcomes keep the page they happened on.
pub fn settle(state: NavState, outcome: &Outcome) -> NavState {
    match (state, outcome) {
        (
            NavState::ListForm { .. },
            Outcome::ListCreated { id, .. } | Outcome::ListUpdated { id, .. },
        ) => NavState::detail(*id),
        (state, _) => state,
    }
}

/// Pick the state and message to show after a failed effect or page load.
///
/// A missing list sends the user home. A missing item only ends item
/// editing. Anything else leaves `state` untouched.
pub fn recover(state: NavState, err: &LmError) -> (NavState, Notice) {
    match err {
        LmError::NotFound {
            entity: Entity::List,
            ..
        } => {
            let message = match state {
                NavState::ListForm { editing: Some(_) } => messages::LIST_NOT_FOUND_FOR_EDIT,
                _ => messages::LIST_NOT_FOUND,
            };
            (home_from(state), Notice::error(message))
        }
        LmError::Referential { .. } => (home_from(state), Notice::error(err.to_string())),
        LmError::NotFound {
            entity: Entity::Item,
            ..
        } => {
            let state = match state {
                NavState::ListDetail { list_id, .. } => NavState::detail(list_id),
                other => other,
            };
            (state, Notice::error(messages::ITEM_NOT_FOUND))
        }
        LmError::Validation { message, .. } => (state, Notice::error(message.clone())),
        _ => (state, Notice::error(format!("Operation failed: {err}"))),
    }
}

/// Home keeps its search filter; any other page resets to the plain home page.
fn home_from(state: NavState) -> NavState {
    match state {
        home @ NavState::Home { .. } => home,
        _ => NavState::home(),
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail_editing(list_id: ListId, item: ItemId) -> NavState {
        NavState::ListDetail {
            list_id,
            editing_item: Some(item),
        }
    }

    #[test]
    fn test_default_is_unfiltered_home() {
        assert_eq!(NavState::default(), NavState::Home { query: None });
        assert_eq!(NavState::default().page_name(), "home");
    }

    #[test]
    fn test_home_transitions() {
        let home = NavState::home();

        assert_eq!(
            apply(&home, Event::CreateNew),
            Step::goto(NavState::ListForm { editing: None })
        );
        assert_eq!(
            apply(&home, Event::EditInfo(4)).state,
            NavState::ListForm { editing: Some(4) }
        );
        assert_eq!(apply(&home, Event::Select(4)).state, NavState::detail(4));

        let step = apply(&home, Event::DeleteList(4));
        assert_eq!(step.state, home);
        assert_eq!(step.effect, Some(Effect::DeleteList(4)));
    }

    #[test]
    fn test_search_keeps_query_and_blank_clears() {
        let home = NavState::home();
        let step = apply(&home, Event::Search(" milk".into()));
        assert_eq!(
            step.state,
            NavState::Home {
                query: Some(" milk".into())
            }
        );

        let cleared = apply(&step.state, Event::Search("   ".into()));
        assert_eq!(cleared.state, NavState::home());
    }

    #[test]
    fn test_delete_keeps_search_filter() {
        let filtered = NavState::Home {
            query: Some("trip".into()),
        };
        let step = apply(&filtered, Event::DeleteList(2));
        assert_eq!(step.state, filtered);
    }

    #[test]
    fn test_submit_blank_title_is_rejected() {
        let form = NavState::ListForm { editing: None };
        let step = apply(&form, Event::SubmitList(ListDraft::new("  ", "note")));
        assert_eq!(step.state, form);
        assert_eq!(step.effect, None);
        assert_eq!(step.notice, Some(Notice::error(messages::TITLE_REQUIRED)));
    }

    #[test]
    fn test_submit_creates_or_updates() {
        let create = apply(
            &NavState::ListForm { editing: None },
            Event::SubmitList(ListDraft::new("Trip", "")),
        );
        assert_eq!(
            create.effect,
            Some(Effect::CreateList(ListDraft::new("Trip", "")))
        );

        let update = apply(
            &NavState::ListForm { editing: Some(9) },
            Event::SubmitList(ListDraft::new("Trip", "July")),
        );
        assert_eq!(
            update.effect,
            Some(Effect::UpdateList {
                id: 9,
                draft: ListDraft::new("Trip", "July")
            })
        );
    }

    #[test]
    fn test_settle_moves_form_to_detail() {
        let form = NavState::ListForm { editing: None };
        let created = Outcome::ListCreated {
            id: 12,
            title: "Trip".into(),
        };
        assert_eq!(settle(form, &created), NavState::detail(12));

        let edit = NavState::ListForm { editing: Some(3) };
        let updated = Outcome::ListUpdated {
            id: 3,
            title: "Trip".into(),
        };
        assert_eq!(settle(edit, &updated), NavState::detail(3));

        let home = NavState::home();
        let deleted = Outcome::ListDeleted {
            title: "Trip".into(),
        };
        assert_eq!(settle(home.clone(), &deleted), home);
    }

    #[test]
    fn test_back_clears_selection() {
        assert_eq!(
            apply(&detail_editing(1, 2), Event::Back).state,
            NavState::home()
        );
        assert_eq!(
            apply(&NavState::ListForm { editing: Some(1) }, Event::Back).state,
            NavState::home()
        );
    }

    #[test]
    fn test_item_editing_sub_state() {
        let detail = NavState::detail(1);

        let editing = apply(&detail, Event::EditItem(5)).state;
        assert_eq!(editing, detail_editing(1, 5));

        // Editing another item replaces the first.
        assert_eq!(
            apply(&editing, Event::EditItem(6)).state,
            detail_editing(1, 6)
        );

        assert_eq!(apply(&editing, Event::CancelEdit).state, detail);
    }

    #[test]
    fn test_save_item() {
        let editing = detail_editing(1, 5);

        let step = apply(
            &editing,
            Event::SaveItem {
                id: 5,
                draft: ItemDraft::new("Milk", "", "2%"),
            },
        );
        assert_eq!(step.state, NavState::detail(1));
        assert!(matches!(step.effect, Some(Effect::UpdateItem { id: 5, .. })));

        let blank = apply(
            &editing,
            Event::SaveItem {
                id: 5,
                draft: ItemDraft::new(" ", "", ""),
            },
        );
        assert_eq!(blank.state, editing);
        assert_eq!(blank.notice, Some(Notice::error(messages::ITEM_NAME_EMPTY)));

        // Saving an item that is not in edit mode is ignored.
        let stray = apply(
            &editing,
            Event::SaveItem {
                id: 6,
                draft: ItemDraft::new("Eggs", "", ""),
            },
        );
        assert_eq!(stray, Step::goto(editing));
    }

    #[test]
    fn test_add_and_delete_item() {
        let detail = NavState::detail(1);

        let add = apply(&detail, Event::AddItem(ItemDraft::new("Eggs", "", "")));
        assert_eq!(add.state, detail);
        assert!(matches!(add.effect, Some(Effect::AddItem { list_id: 1, .. })));

        let blank = apply(&detail, Event::AddItem(ItemDraft::default()));
        assert_eq!(blank.effect, None);
        assert_eq!(
            blank.notice,
            Some(Notice::error(messages::ITEM_NAME_REQUIRED))
        );

        let delete = apply(&detail_editing(1, 5), Event::DeleteItem(7));
        assert_eq!(delete.state, detail);
        assert_eq!(delete.effect, Some(Effect::DeleteItem(7)));
    }

    #[test]
    fn test_unrelated_events_are_ignored() {
        let home = NavState::home();
        assert_eq!(apply(&home, Event::Back), Step::goto(home.clone()));
        assert_eq!(apply(&home, Event::CancelEdit).state, home);

        let form = NavState::ListForm { editing: None };
        assert_eq!(apply(&form, Event::Select(1)).state, form);

        let detail = NavState::detail(1);
        assert_eq!(apply(&detail, Event::CreateNew).state, detail);
    }

    #[test]
    fn test_recover_missing_list_goes_home() {
        let (state, notice) = recover(NavState::detail(3), &LmError::list_not_found(3));
        assert_eq!(state, NavState::home());
        assert_eq!(notice, Notice::error(messages::LIST_NOT_FOUND));

        let (state, notice) = recover(
            NavState::ListForm { editing: Some(3) },
            &LmError::list_not_found(3),
        );
        assert_eq!(state, NavState::home());
        assert_eq!(notice.text, messages::LIST_NOT_FOUND_FOR_EDIT);

        let filtered = NavState::Home {
            query: Some("x".into()),
        };
        let (state, _) = recover(filtered.clone(), &LmError::list_not_found(3));
        assert_eq!(state, filtered);

        let (state, notice) = recover(NavState::detail(3), &LmError::Referential { list_id: 3 });
        assert_eq!(state, NavState::home());
        assert!(notice.is_error());
    }

    #[test]
    fn test_recover_missing_item_ends_editing() {
        let (state, notice) = recover(detail_editing(1, 5), &LmError::item_not_found(5));
        assert_eq!(state, NavState::detail(1));
        assert_eq!(notice.text, messages::ITEM_NOT_FOUND);
    }

    #[test]
    fn test_recover_storage_failure_keeps_state() {
        let detail = detail_editing(1, 5);
        let (state, notice) = recover(detail.clone(), &LmError::Database("disk I/O error".into()));
        assert_eq!(state, detail);
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.text.contains("disk I/O error"));
    }

    #[test]
    fn test_outcome_notices() {
        let notice = Outcome::ListCreated {
            id: 1,
            title: "Trip".into(),
        }
        .notice();
        assert_eq!(notice, Notice::success("List 'Trip' created successfully!"));

        let notice = Outcome::ItemDeleted { name: "Milk".into() }.notice();
        assert_eq!(notice.text, "Item 'Milk' deleted.");
    }
}
