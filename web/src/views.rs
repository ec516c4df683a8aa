//! Server-rendered HTML pages.
//!
//! Every page is a plain `String` built from the shared layout. All
//! user-provided text goes through `escape` before it reaches the markup.

use todo_core::{FormErrors, Todo, TodoForm, TodoId, TITLE_MAX_CHARS};

use crate::{CREATE_PATH, LIST_PATH};

pub fn edit_path(id: TodoId) -> String {
    format!("/edit/{id}/")
}

pub fn delete_path(id: TodoId) -> String {
    format!("/delete/{id}/")
}

pub fn toggle_path(id: TodoId) -> String {
    format!("/toggle/{id}/")
}

/// Which form a page renders, and where it posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormTarget {
    Create,
    Edit(TodoId),
}

impl FormTarget {
    fn action(self) -> String {
        match self {
            Self::Create => CREATE_PATH.to_string(),
            Self::Edit(id) => edit_path(id),
        }
    }

    fn heading(self) -> &'static str {
        match self {
            Self::Create => "New todo",
            Self::Edit(_) => "Edit todo",
        }
    }
}

/// The todo list, one row per todo in store order.
pub fn list_page(todos: &[Todo]) -> String {
    let body = if todos.is_empty() {
        "<p>No todos yet.</p>".to_string()
    } else {
        let rows: String = todos.iter().map(todo_row).collect();
        format!("<ul class=\"todos\">\n{rows}</ul>")
    };

    layout(
        "Todos",
        &format!(
            "<h1>Todos</h1>\n<p><a href=\"{CREATE_PATH}\">Add todo</a></p>\n{body}"
        ),
    )
}

fn todo_row(todo: &Todo) -> String {
    let class = if todo.is_resolved { "resolved" } else { "open" };
    let marker = if todo.is_resolved { "&#10003;" } else { "&#9744;" };
    let toggle_label = if todo.is_resolved { "Reopen" } else { "Resolve" };

    let description = if todo.description.is_empty() {
        String::new()
    } else {
        format!(" <span class=\"description\">{}</span>", escape(&todo.description))
    };
    let due = todo
        .due_date
        .map(|date| format!(" <span class=\"due\">due {date}</span>"))
        .unwrap_or_default();

    format!(
        "<li class=\"{class}\">{marker} <strong>{title}</strong>{description}{due} \
         <a href=\"{edit}\">Edit</a> <a href=\"{toggle}\">{toggle_label}</a> \
         <a href=\"{delete}\">Delete</a></li>\n",
        title = escape(&todo.title),
        edit = edit_path(todo.id),
        toggle = toggle_path(todo.id),
        delete = delete_path(todo.id),
    )
}

/// The create/edit form, echoing `form` and showing `errors` next to each
/// field.
pub fn form_page(target: FormTarget, form: &TodoForm, errors: &FormErrors) -> String {
    let checked = if form.is_resolved_checked() { " checked" } else { "" };

    let body = format!(
        "<h1>{heading}</h1>
<form method=\"post\" action=\"{action}\">
<p><label for=\"id_title\">Title</label>
<input type=\"text\" name=\"title\" id=\"id_title\" maxlength=\"{TITLE_MAX_CHARS}\" value=\"{title}\">{title_errors}</p>
<p><label for=\"id_description\">Description</label>
<textarea name=\"description\" id=\"id_description\">{description}</textarea>{description_errors}</p>
<p><label for=\"id_due_date\">Due date</label>
<input type=\"date\" name=\"due_date\" id=\"id_due_date\" value=\"{due_date}\">{due_date_errors}</p>
<p><label for=\"id_is_resolved\">Resolved</label>
<input type=\"checkbox\" name=\"is_resolved\" id=\"id_is_resolved\"{checked}></p>
<button type=\"submit\">Save</button> <a href=\"{LIST_PATH}\">Cancel</a>
</form>",
        heading = target.heading(),
        action = target.action(),
        title = escape(&form.title),
        title_errors = field_errors(errors, "title"),
        description = escape(&form.description),
        description_errors = field_errors(errors, "description"),
        due_date = escape(&form.due_date),
        due_date_errors = field_errors(errors, "due_date"),
    );

    layout(target.heading(), &body)
}

fn field_errors(errors: &FormErrors, field: &str) -> String {
    let messages = errors.get(field);
    if messages.is_empty() {
        return String::new();
    }
    let items: String = messages
        .iter()
        .map(|message| format!("<li>{}</li>", escape(message)))
        .collect();
    format!("<ul class=\"errorlist\">{items}</ul>")
}

pub fn not_found_page() -> String {
    layout(
        "Not found",
        &format!("<h1>Not found</h1>\n<p><a href=\"{LIST_PATH}\">Back to todos</a></p>"),
    )
}

pub fn server_error_page() -> String {
    layout(
        "Server error",
        "<h1>Server error</h1>\n<p>Something went wrong. Please try again.</p>",
    )
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"utf-8\">
<title>{title}</title>
</head>
<body>
{body}
</body>
</html>
"
    )
}

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}
