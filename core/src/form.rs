//! Raw form submissions and their cleaning into `TodoFields`.
//!
//! # Design
//! `TodoForm` deserializes every field as plain text with a blank default, so
//! a submission with missing or malformed fields still reaches the handler.
//! `clean` then turns it into either validated `TodoFields` or per-field
//! messages the page can show next to each input. The raw form is kept around
//! on failure so the page can echo what the user typed.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::types::{Todo, TodoFields};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// An unvalidated create/edit submission, exactly as posted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TodoForm {
    pub title: String,
    pub description: String,
    pub due_date: String,
    /// Checkbox value; absent when unchecked.
    pub is_resolved: Option<String>,
}

impl TodoForm {
    /// Form pre-filled from an existing todo, as shown on the edit page.
    pub fn from_todo(todo: &Todo) -> Self {
        Self {
            title: todo.title.clone(),
            description: todo.description.clone(),
            due_date: todo
                .due_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            is_resolved: todo.is_resolved.then(|| "on".to_string()),
        }
    }

    /// Whether the checkbox should render as checked.
    pub fn is_resolved_checked(&self) -> bool {
        checkbox_value(self.is_resolved.as_deref())
    }

    /// Parses and validates the submission.
    ///
    /// Text fields are stripped of surrounding whitespace. A blank due date
    /// means no due date.
    pub fn clean(&self) -> Result<TodoFields, FormErrors> {
        let mut errors = FormErrors::default();

        let due_date = match self.due_date.trim() {
            "" => None,
            raw => match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.add("due_date", "Enter a valid date.");
                    None
                }
            },
        };

        let fields = TodoFields {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            due_date,
            is_resolved: self.is_resolved_checked(),
        };

        if let Err(field_errors) = fields.validate() {
            errors.merge(field_errors);
        }

        errors.into_result().map(|()| fields)
    }
}

/// HTML checkbox semantics: absent or empty is unchecked, `true`/`false` in
/// any case map to themselves, anything else (`on`, `1`, ...) is checked.
fn checkbox_value(raw: Option<&str>) -> bool {
    match raw {
        None => false,
        Some(value) if value.eq_ignore_ascii_case("false") => false,
        Some(value) if value.eq_ignore_ascii_case("true") => true,
        Some(value) => !value.is_empty(),
    }
}

/// Validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
}

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    /// Messages for one field, empty when the field is valid.
    pub fn get(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn merge(&mut self, other: FormErrors) {
        for (field, messages) in other.fields {
            self.fields.entry(field).or_default().extend(messages);
        }
    }

    pub(crate) fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.fields {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FormErrors {}
