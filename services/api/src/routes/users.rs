//! User registration

use axum::{Json, extract::State, http::StatusCode};
use axum_extra::extract::WithRejection;
use common::password;
use tracing::{error, info};

use crate::{
    error::{ApiError, ApiResult},
    models::{CreateUserRequest, UserResponse},
    state::AppState,
    validation::FieldErrors,
};

/// Register a new user
///
/// Open to anonymous callers. The password is hashed before it reaches the
/// repository and is never part of the response.
pub async fn create_user(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<CreateUserRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let new_user = payload.validate()?;

    if state.user_store.username_exists(&new_user.username).await? {
        let mut errors = FieldErrors::new();
        errors.add("username", "A user with that username already exists.");
        return Err(errors.into());
    }

    let plaintext = new_user.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || password::hash_password(&plaintext))
        .await
        .map_err(|e| {
            error!("Password hashing task failed: {}", e);
            ApiError::InternalServerError
        })?
        .map_err(|e| {
            error!("Failed to hash password: {}", e);
            ApiError::InternalServerError
        })?;

    let user = state.user_store.create(&new_user, &password_hash).await?;
    info!(user_id = user.id, "User registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
