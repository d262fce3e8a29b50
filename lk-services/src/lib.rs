//! ListKeeper Services - persistence facade and page logic.
//!
//! This crate provides:
//! - `ListStore`: the create/read/update/delete/search operations over lists
//!   and items, one transaction per operation
//! - `navigation`: the page state machine as pure functions over an
//!   immutable `NavState`
//! - `Controller`: runs the effects a transition asks for and loads the data
//!   each page needs
//! - `view`: the page payloads handed to a renderer

pub mod store;
pub mod navigation;
pub mod view;
pub mod controller;

// Re-export key types
pub use store::ListStore;
pub use navigation::{Effect, Event, ItemDraft, ListDraft, NavState, Notice, NoticeLevel, Outcome, Step};
pub use view::{ListSummary, PageView, Screen};
pub use controller::{Controller, Dispatch};
