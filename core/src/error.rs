//! Error types for the todo store.
//!
//! # Design
//! `NotFound` gets a dedicated variant because the web layer maps it to a 404
//! page while every other store failure is a server error. Validation errors
//! carry the same `FormErrors` the form layer produces, so a write that slips
//! past the form is still reported field by field.

use thiserror::Error;

use crate::form::FormErrors;
use crate::types::TodoId;

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by `TodoStore` operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No todo has the requested id.
    #[error("todo not found: {0}")]
    NotFound(TodoId),

    /// The fields to write break a todo invariant.
    #[error("invalid todo: {0}")]
    Validation(#[from] FormErrors),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// The database was migrated by a newer build.
    #[error("database schema version {db_version} is newer than supported {latest_supported}")]
    UnsupportedSchemaVersion { db_version: u32, latest_supported: u32 },
}
