//! Domain core for the todo web app.
//!
//! # Overview
//! Defines the `Todo` entity, turns raw form submissions into validated
//! fields, and persists todos in SQLite. Nothing here knows about HTTP; the
//! web crate drives these types from its handlers.
//!
//! # Design
//! - `TodoForm::clean` is the only way user input becomes `TodoFields`.
//! - `TodoStore` re-validates on every write, so the "non-empty title"
//!   invariant holds even for callers that skip the form.
//! - Ids come from SQLite `AUTOINCREMENT`: insertion ordered and never reused.

pub mod db;
pub mod error;
pub mod form;
pub mod store;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use form::{FormErrors, TodoForm};
pub use store::TodoStore;
pub use types::{Todo, TodoFields, TodoId, TITLE_MAX_CHARS};
