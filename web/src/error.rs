//! HTTP error responses.
//!
//! Validation failures are not errors at this layer: handlers re-render the
//! form with a 200. What remains is "no such todo" and everything else.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use todo_core::StoreError;

use crate::views;

#[derive(Debug, Error)]
pub enum AppError {
    /// Unknown route or a todo id with no record (404).
    #[error("not found")]
    NotFound,

    /// Store failure (500). Logged, never shown to the client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::NotFound,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (StatusCode::NOT_FOUND, Html(views::not_found_page())).into_response(),
            Self::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Html(views::server_error_page())).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_not_found_maps_to_404() {
        let response = AppError::from(StoreError::NotFound(9)).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn other_store_errors_map_to_500() {
        let err = AppError::from(StoreError::UnsupportedSchemaVersion {
            db_version: 9,
            latest_supported: 1,
        });
        assert!(matches!(err, AppError::Internal(ref msg) if msg.contains("newer than supported")));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
