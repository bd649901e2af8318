//! Error taxonomy for the catalog core

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde_json::json;
use techflow_types::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// Malformed creation input; surfaced for form re-display, not a crash.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Requested service id absent; callers are routed back to the list.
    #[error("service not found")]
    NotFound,

    /// Bad credentials. The message does not say whether the username exists.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("password hashing error: {0}")]
    PasswordHash(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        match self {
            CatalogError::Validation(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response(),
            // Never a hard 404: route the caller back to the public list.
            CatalogError::NotFound => Redirect::to("/servicios").into_response(),
            CatalogError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "invalid credentials" })),
            )
                .into_response(),
            CatalogError::Database(e) => {
                tracing::error!("Storage error: {}", e);
                generic_failure()
            }
            CatalogError::PasswordHash(e) => {
                tracing::error!("Password hashing error: {}", e);
                generic_failure()
            }
        }
    }
}

/// Storage-layer and hashing failures are logged, never leaked.
fn generic_failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "internal server error" })),
    )
        .into_response()
}
