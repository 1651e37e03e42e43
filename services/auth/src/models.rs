//! Token service models

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The slice of a `crud_user` row needed to authenticate
#[derive(Debug, Clone, FromRow)]
pub struct Credentials {
    pub id: i32,
    pub username: String,
    /// Argon2 PHC string
    pub password: String,
    pub is_active: bool,
}

/// Body of `POST /auth/token`
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

/// Response for token generation
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Body of `POST /auth/token/refresh`
#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

/// Response for token refresh
#[derive(Debug, Serialize)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}
