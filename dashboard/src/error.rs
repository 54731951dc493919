//! Error types for request handling.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Dashboard error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Query failed or the database is unreachable.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Template rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// A requested entity does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),
}

/// Result type alias for the dashboard.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound(what) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "detail": format!("{what} not found") })),
            )
                .into_response(),
            Error::Database(e) => {
                error!(error = %e, "Database query failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Database unavailable").into_response()
            }
            Error::Template(e) => {
                error!(error = %e, "Template rendering failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let response = Error::NotFound("Group").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = Error::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_display() {
        assert_eq!(Error::NotFound("Sender").to_string(), "Sender not found");
    }
}
