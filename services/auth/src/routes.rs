//! Token service routes

use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::WithRejection;
use common::{jwt::TokenType, password};
use serde_json::json;
use tracing::{error, info, warn};

use crate::{
    AppState,
    error::{AuthError, AuthResult},
    models::{RefreshTokenRequest, RefreshTokenResponse, TokenRequest, TokenResponse},
};

/// Create the router for the token service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/auth/token", post(obtain_token))
        .route("/auth/token/refresh", post(refresh_token))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "auth-service"
    }))
}

/// Exchange a username and password for an access/refresh pair
pub async fn obtain_token(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<TokenRequest>, AuthError>,
) -> AuthResult<Json<TokenResponse>> {
    info!("Token request for user: {}", payload.username);

    let account = state
        .credential_store
        .find_by_username(&payload.username)
        .await?
        .filter(|c| c.is_active);

    // Unknown and inactive accounts still pay for a verification
    let stored_hash = account.as_ref().map(|c| c.password.clone());
    let username = payload.username;
    let plaintext = payload.password;
    let matches = tokio::task::spawn_blocking(move || match stored_hash {
        Some(hash) => password::verify_password(&plaintext, &hash),
        None => Ok(password::verify_dummy(&plaintext)),
    })
    .await
    .map_err(|e| {
        error!("Password verification task failed: {}", e);
        AuthError::InternalServerError
    })?
    .unwrap_or_else(|e| {
        warn!("Unusable password hash for {}: {}", username, e);
        false
    });

    let credentials = match account {
        Some(credentials) if matches => credentials,
        _ => return Err(AuthError::InvalidCredentials),
    };

    let access_token = state
        .jwt_service
        .generate_access_token(credentials.id)
        .map_err(|e| {
            error!("Failed to generate access token: {}", e);
            AuthError::InternalServerError
        })?;

    let refresh_token = state
        .jwt_service
        .generate_refresh_token(credentials.id)
        .map_err(|e| {
            error!("Failed to generate refresh token: {}", e);
            AuthError::InternalServerError
        })?;

    info!(user_id = credentials.id, "Tokens issued");

    Ok(Json(TokenResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_service.access_token_expiry(),
    }))
}

/// Exchange a refresh token for a new access token
pub async fn refresh_token(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<RefreshTokenRequest>, AuthError>,
) -> AuthResult<Json<RefreshTokenResponse>> {
    let claims = state
        .jwt_service
        .validate_token_of_type(&payload.refresh_token, TokenType::Refresh)
        .map_err(|e| {
            warn!("Rejected refresh token: {}", e);
            AuthError::InvalidToken
        })?;

    let access_token = state
        .jwt_service
        .generate_access_token(claims.user_id)
        .map_err(|e| {
            error!("Failed to generate access token: {}", e);
            AuthError::InternalServerError
        })?;

    Ok(Json(RefreshTokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt_service.access_token_expiry(),
    }))
}
