//! Server-rendered todo list over a SQLite store.
//!
//! | Name                  | Method     | Path            |
//! |-----------------------|------------|-----------------|
//! | `todo_list`           | GET        | `/`             |
//! | `todo_create`         | GET, POST  | `/create/`      |
//! | `todo_edit`           | GET, POST  | `/edit/{id}/`   |
//! | `todo_delete`         | GET        | `/delete/{id}/` |
//! | `todo_toggle_resolve` | GET        | `/toggle/{id}/` |
//!
//! Successful mutations answer `302 Found` back to the list. A create or edit
//! that fails validation re-renders the form with a 200 and writes nothing.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Form, Router,
};
use tokio::{net::TcpListener, sync::Mutex};
use todo_core::{FormErrors, TodoForm, TodoId, TodoStore};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod views;

pub use config::Config;
pub use error::AppError;

use views::FormTarget;

pub const LIST_PATH: &str = "/";
pub const CREATE_PATH: &str = "/create/";

/// The store shared by every handler. One request touches it at a time.
pub type Db = Arc<Mutex<TodoStore>>;

pub fn shared(store: TodoStore) -> Db {
    Arc::new(Mutex::new(store))
}

pub fn app(db: Db) -> Router {
    Router::new()
        .route(LIST_PATH, get(todo_list))
        .route(CREATE_PATH, get(create_form).post(todo_create))
        .route("/edit/{id}/", get(edit_form).post(todo_edit))
        .route("/delete/{id}/", get(todo_delete))
        .route("/toggle/{id}/", get(todo_toggle_resolve))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app(db)).await
}

fn redirect_to_list() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, LIST_PATH)]).into_response()
}

async fn todo_list(State(db): State<Db>) -> Result<Html<String>, AppError> {
    let todos = db.lock().await.list()?;
    Ok(Html(views::list_page(&todos)))
}

async fn create_form() -> Html<String> {
    Html(views::form_page(
        FormTarget::Create,
        &TodoForm::default(),
        &FormErrors::default(),
    ))
}

async fn todo_create(
    State(db): State<Db>,
    Form(input): Form<TodoForm>,
) -> Result<Response, AppError> {
    let fields = match input.clean() {
        Ok(fields) => fields,
        Err(errors) => {
            tracing::debug!(%errors, "rejected new todo");
            return Ok(Html(views::form_page(FormTarget::Create, &input, &errors)).into_response());
        }
    };

    db.lock().await.create(&fields)?;
    Ok(redirect_to_list())
}

async fn edit_form(
    State(db): State<Db>,
    Path(id): Path<TodoId>,
) -> Result<Html<String>, AppError> {
    let todo = db.lock().await.get(id)?.ok_or(AppError::NotFound)?;
    Ok(Html(views::form_page(
        FormTarget::Edit(id),
        &TodoForm::from_todo(&todo),
        &FormErrors::default(),
    )))
}

async fn todo_edit(
    State(db): State<Db>,
    Path(id): Path<TodoId>,
    Form(input): Form<TodoForm>,
) -> Result<Response, AppError> {
    let store = db.lock().await;
    if store.get(id)?.is_none() {
        return Err(AppError::NotFound);
    }

    match input.clean() {
        Ok(fields) => {
            store.update(id, &fields)?;
            Ok(redirect_to_list())
        }
        Err(errors) => {
            tracing::debug!(id, %errors, "rejected todo edit");
            Ok(Html(views::form_page(FormTarget::Edit(id), &input, &errors)).into_response())
        }
    }
}

async fn todo_delete(
    State(db): State<Db>,
    Path(id): Path<TodoId>,
) -> Result<Response, AppError> {
    db.lock().await.delete(id)?;
    Ok(redirect_to_list())
}

async fn todo_toggle_resolve(
    State(db): State<Db>,
    Path(id): Path<TodoId>,
) -> Result<Response, AppError> {
    db.lock().await.toggle_resolved(id)?;
    Ok(redirect_to_list())
}

async fn not_found() -> AppError {
    AppError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_points_at_list() {
        let response = redirect_to_list();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], LIST_PATH);
    }

    #[tokio::test]
    async fn todo_form_deserializes_with_missing_fields() {
        use axum::{body::Body, extract::FromRequest, http::Request};

        let request = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("title=Only+title"))
            .unwrap();
        let Form(input) = Form::<TodoForm>::from_request(request, &()).await.unwrap();

        assert_eq!(input.title, "Only title");
        assert_eq!(input.description, "");
        assert_eq!(input.due_date, "");
        assert!(input.is_resolved.is_none());
    }
}
