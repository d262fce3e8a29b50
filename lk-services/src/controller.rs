//! Controller binding the navigation state machine to storage.
//!
//! The controller holds no navigation state of its own. Callers pass the
//! current [`NavState`] in and get the next one back, so the whole session
//! is a fold of events over states.

use tracing::{debug, error, warn};

use lk_core::constants::messages;
use lk_core::error::{LmError, LmResult};

use crate::navigation::{self, Effect, Event, NavState, Notice, Outcome};
use crate::store::ListStore;
use crate::view::{ListSummary, PageView, Screen};

/// Result of dispatching one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    pub state: NavState,
    /// Messages produced while handling the event, in order.
    pub notices: Vec<Notice>,
}

/// Runs effects against a [`ListStore`] and loads page data.
pub struct Controller {
    store: ListStore,
}

impl Controller {
    pub fn new(store: ListStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ListStore {
        &self.store
    }

    /// Handle one user event from `state`.
    ///
    /// Storage failures never escape: they become an error notice and a
    /// recovered state.
    pub fn dispatch(&self, state: &NavState, event: Event) -> Dispatch {
        debug!("dispatching {event:?} on {}", state.page_name());
        let step = navigation::apply(state, event);
        let mut notices: Vec<Notice> = step.notice.into_iter().collect();

        let Some(effect) = step.effect else {
            return Dispatch {
                state: step.state,
                notices,
            };
        };

        let next = match self.perform(effect) {
            Ok(outcome) => {
                notices.push(outcome.notice());
                navigation::settle(step.state, &outcome)
            }
            Err(err) => {
                if err.is_user_facing() {
                    warn!("operation rejected on {}: {err}", state.page_name());
                } else {
                    error!("operation failed on {}: {err}", state.page_name());
                }
                let (next, notice) = navigation::recover(state.clone(), &err);
                notices.push(notice);
                next
            }
        };

        Dispatch {
            state: next,
            notices,
        }
    }

    fn perform(&self, effect: Effect) -> LmResult<Outcome> {
        match effect {
            Effect::CreateList(draft) => {
                let id = self.store.create_list(&draft.title, &draft.note)?;
                Ok(Outcome::ListCreated {
                    id,
                    title: draft.title,
                })
            }
            Effect::UpdateList { id, draft } => {
                self.store.update_list_details(id, &draft.title, &draft.note)?;
                Ok(Outcome::ListUpdated {
                    id,
                    title: draft.title,
                })
            }
            Effect::DeleteList(id) => {
                let list = self.store.delete_list(id)?;
                Ok(Outcome::ListDeleted { title: list.title })
            }
            Effect::AddItem { list_id, draft } => {
                self.store
                    .add_item_to_list(list_id, &draft.name, &draft.address, &draft.notes)?;
                Ok(Outcome::ItemAdded { name: draft.name })
            }
            Effect::UpdateItem { id, draft } => {
                self.store
                    .update_list_item(id, &draft.name, &draft.address, &draft.notes)?;
                Ok(Outcome::ItemUpdated { name: draft.name })
            }
            Effect::DeleteItem(id) => {
                let item = self.store.delete_list_item(id)?;
                Ok(Outcome::ItemDeleted { name: item.name })
            }
        }
    }

    /// Load the data for the page `state` points at.
    ///
    /// A page whose list has disappeared redirects to Home with an error
    /// notice; an edited item that has disappeared just leaves edit mode.
    /// A storage failure on any other page also lands on Home with an error
    /// notice. Only a failure to load Home itself is returned as `Err`.
    pub fn view(&self, state: NavState) -> LmResult<Screen> {
        if matches!(state, NavState::Home { .. }) {
            return self.load(state);
        }

        let from = state.clone();
        match self.load(state) {
            Ok(screen) => Ok(screen),
            Err(err) => {
                error!("loading {} failed: {err}", from.page_name());
                let (_, notice) = navigation::recover(from, &err);
                Ok(Screen {
                    page: self.home_page(None)?,
                    state: NavState::home(),
                    notice: Some(notice),
                })
            }
        }
    }

    fn load(&self, state: NavState) -> LmResult<Screen> {
        match state {
            NavState::Home { query } => Ok(Screen {
                page: self.home_page(query.clone())?,
                state: NavState::Home { query },
                notice: None,
            }),
            NavState::ListForm { editing: None } => Ok(Screen {
                state,
                page: PageView::ListForm { existing: None },
                notice: None,
            }),
            NavState::ListForm { editing: Some(id) } => match self.store.get_list_by_id(id)? {
                Some(list) => Ok(Screen {
                    state,
                    page: PageView::ListForm {
                        existing: Some(list),
                    },
                    notice: None,
                }),
                None => self.redirect_home(state, LmError::list_not_found(id)),
            },
            NavState::ListDetail {
                list_id,
                editing_item,
            } => {
                let Some(list) = self.store.get_list_by_id(list_id)? else {
                    return self.redirect_home(state, LmError::list_not_found(list_id));
                };
                let items = self.store.get_items_for_list(list_id)?;

                let (editing_item, notice) = match editing_item {
                    Some(id) if !items.iter().any(|item| item.id == id) => {
                        (None, Some(Notice::error(messages::ITEM_NOT_FOUND)))
                    }
                    other => (other, None),
                };

                Ok(Screen {
                    state: NavState::ListDetail {
                        list_id,
                        editing_item,
                    },
                    page: PageView::ListDetail {
                        list,
                        items,
                        editing_item,
                    },
                    notice,
                })
            }
        }
    }

    fn home_page(&self, query: Option<String>) -> LmResult<PageView> {
        let lists = match query.as_deref() {
            Some(q) => self.store.search_lists(q)?,
            None => self.store.get_all_lists()?,
        };
        let counts = self.store.item_counts()?;

        let lists = lists
            .into_iter()
            .map(|list| ListSummary {
                item_count: counts.get(&list.id).copied().unwrap_or(0),
                list,
            })
            .collect();

        Ok(PageView::Home { query, lists })
    }

    fn redirect_home(&self, from: NavState, err: LmError) -> LmResult<Screen> {
        warn!("redirecting {} to home: {err}", from.page_name());
        let (state, notice) = navigation::recover(from, &err);
        let query = match state {
            NavState::Home { query } => query,
            _ => None,
        };
        let page = self.home_page(query.clone())?;
        Ok(Screen {
            state: NavState::Home { query },
            page,
            notice: Some(notice),
        })
    }
}
