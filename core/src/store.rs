//! SQLite-backed todo storage.
//!
//! # Design
//! `TodoStore` owns its connection and every method is one synchronous
//! statement, so each call either commits or leaves the table untouched.
//! Write paths run `TodoFields::validate` before any SQL.

use std::path::Path;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db;
use crate::error::{StoreError, StoreResult};
use crate::types::{Todo, TodoFields, TodoId};

const TODO_COLUMNS: &str = "id, title, description, due_date, is_resolved";

/// Persistent collection of todos.
#[derive(Debug)]
pub struct TodoStore {
    conn: Connection,
}

impl TodoStore {
    /// Opens the database file at `path`, creating and migrating it if needed.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Ok(Self {
            conn: db::open(path)?,
        })
    }

    /// A fresh store that lives only as long as this value.
    pub fn open_in_memory() -> StoreResult<Self> {
        Ok(Self {
            conn: db::open_in_memory()?,
        })
    }

    /// All todos in insertion order.
    pub fn list(&self) -> StoreResult<Vec<Todo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {TODO_COLUMNS} FROM todos ORDER BY id;"))?;
        let todos = stmt
            .query_map([], todo_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(todos)
    }

    pub fn get(&self, id: TodoId) -> StoreResult<Option<Todo>> {
        let todo = self
            .conn
            .query_row(
                &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1;"),
                params![id],
                todo_from_row,
            )
            .optional()?;
        Ok(todo)
    }

    pub fn count(&self) -> StoreResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM todos;", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// Inserts a new todo and returns it with its assigned id.
    pub fn create(&self, fields: &TodoFields) -> StoreResult<Todo> {
        fields.validate()?;

        let todo = self.conn.query_row(
            &format!(
                "INSERT INTO todos (title, description, due_date, is_resolved)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING {TODO_COLUMNS};"
            ),
            params![
                fields.title,
                fields.description,
                fields.due_date,
                fields.is_resolved
            ],
            todo_from_row,
        )?;

        tracing::info!(id = todo.id, "created todo");
        Ok(todo)
    }

    /// Replaces every editable field of an existing todo.
    pub fn update(&self, id: TodoId, fields: &TodoFields) -> StoreResult<Todo> {
        fields.validate()?;

        let todo = self
            .conn
            .query_row(
                &format!(
                    "UPDATE todos
                     SET title = ?1, description = ?2, due_date = ?3, is_resolved = ?4
                     WHERE id = ?5
                     RETURNING {TODO_COLUMNS};"
                ),
                params![
                    fields.title,
                    fields.description,
                    fields.due_date,
                    fields.is_resolved,
                    id
                ],
                todo_from_row,
            )
            .optional()?
            .ok_or(StoreError::NotFound(id))?;

        tracing::info!(id, "updated todo");
        Ok(todo)
    }

    /// Removes a todo permanently.
    pub fn delete(&self, id: TodoId) -> StoreResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM todos WHERE id = ?1;", params![id])?;
        if removed == 0 {
            return Err(StoreError::NotFound(id));
        }

        tracing::info!(id, "deleted todo");
        Ok(())
    }

    /// Flips `is_resolved` and returns the todo as stored afterwards.
    pub fn toggle_resolved(&self, id: TodoId) -> StoreResult<Todo> {
        let todo = self
            .conn
            .query_row(
                &format!(
                    "UPDATE todos SET is_resolved = NOT is_resolved
                     WHERE id = ?1
                     RETURNING {TODO_COLUMNS};"
                ),
                params![id],
                todo_from_row,
            )
            .optional()?
            .ok_or(StoreError::NotFound(id))?;

        tracing::info!(id, is_resolved = todo.is_resolved, "toggled todo");
        Ok(todo)
    }
}

fn todo_from_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
    Ok(Todo {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        due_date: row.get(3)?,
        is_resolved: row.get(4)?,
    })
}
