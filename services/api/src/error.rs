//! Custom error types for the API service

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::validation::FieldErrors;

/// Custom error type for the API service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing, malformed or expired bearer token
    #[error("Unauthorized")]
    Unauthorized,

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// One or more payload fields failed validation
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// No row matched (or it belongs to someone else)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl ApiError {
    pub fn not_found() -> Self {
        ApiError::NotFound("Not found.".to_string())
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Non-numeric or out-of-range ids cannot name a row
impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::not_found()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Validation(fields) => {
                let body = Json(json!({
                    "error": "Validation failed",
                    "fields": fields,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            ApiError::Database(DatabaseError::Integrity(e)) => {
                error!("Database integrity error: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    "Database integrity error".to_string(),
                )
            }
            ApiError::Database(e) => {
                error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
