//! Domain types for the todo store.
//!
//! # Design
//! `Todo` is what the store hands back: it always carries a store-assigned
//! `id`. `TodoFields` is the id-less set of user-editable values that create
//! and edit both write wholesale. Keeping them apart means no caller can
//! invent or change an id.

use chrono::NaiveDate;

use crate::form::FormErrors;

/// Store-assigned identifier. Ids grow with insertion order and are never
/// reused.
pub type TodoId = i64;

/// Longest title accepted, counted in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// A persisted todo item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    /// Empty when the todo has no description.
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub is_resolved: bool,
}

impl Todo {
    /// The editable part of this todo.
    pub fn fields(&self) -> TodoFields {
        TodoFields {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date,
            is_resolved: self.is_resolved,
        }
    }
}

/// The values a create or edit writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoFields {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub is_resolved: bool,
}

impl TodoFields {
    /// Fields for a new, unresolved todo with no description or due date.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Checks the invariants every persisted todo must hold.
    ///
    /// Called by the form layer after parsing and again by the store before
    /// any write.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        if self.title.trim().is_empty() {
            errors.add("title", "This field is required.");
        } else {
            let len = self.title.chars().count();
            if len > TITLE_MAX_CHARS {
                errors.add(
                    "title",
                    format!(
                        "Ensure this value has at most {TITLE_MAX_CHARS} characters (it has {len})."
                    ),
                );
            }
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_copies_everything_but_the_id() {
        let todo = Todo {
            id: 3,
            title: "Walk dog".to_string(),
            description: "twice".to_string(),
            due_date: NaiveDate::from_ymd_opt(2030, 1, 1),
            is_resolved: true,
        };
        let fields = todo.fields();
        assert_eq!(fields.title, "Walk dog");
        assert_eq!(fields.description, "twice");
        assert_eq!(fields.due_date, todo.due_date);
        assert!(fields.is_resolved);
    }

    #[test]
    fn validate_rejects_blank_title() {
        let errors = TodoFields::titled("   ").validate().unwrap_err();
        assert_eq!(errors.get("title"), ["This field is required."]);
    }

    #[test]
    fn validate_rejects_overlong_title() {
        let errors = TodoFields::titled("x".repeat(TITLE_MAX_CHARS + 1))
            .validate()
            .unwrap_err();
        assert_eq!(
            errors.get("title"),
            ["Ensure this value has at most 200 characters (it has 201)."]
        );
    }

    #[test]
    fn validate_accepts_title_at_limit() {
        assert!(TodoFields::titled("é".repeat(TITLE_MAX_CHARS)).validate().is_ok());
    }
}
