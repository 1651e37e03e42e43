//! Error type for the token service

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

pub const INVALID_CREDENTIALS: &str = "No active account found with the given credentials";
pub const INVALID_TOKEN: &str = "Token is invalid or expired";

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown user, inactive user or wrong password
    #[error("{}", INVALID_CREDENTIALS)]
    InvalidCredentials,

    #[error("{}", INVALID_TOKEN)]
    InvalidToken,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    InternalServerError,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, INVALID_CREDENTIALS.to_string())
            }
            AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, INVALID_TOKEN.to_string()),
            AuthError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AuthError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            AuthError::Database(e) => {
                error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type AuthResult<T> = Result<T, AuthError>;
