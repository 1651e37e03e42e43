//! Session handlers
//!
//! Every handler here sits behind `auth_middleware` and receives the caller as
//! an explicit `AuthUser`. Lookups always include the owner, so a session that
//! belongs to someone else answers exactly like a missing one: 404.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{Sessao, SessaoRequest},
    state::AppState,
};

/// List the caller's sessions
pub async fn list_sessoes(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Sessao>>> {
    let sessions = state.sessao_store.list_by_owner(user.id).await?;
    Ok(Json(sessions))
}

/// Create a session owned by the caller
pub async fn create_sessao(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Json(payload), _): WithRejection<Json<SessaoRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<Sessao>)> {
    let fields = payload.validate()?;
    let sessao = state.sessao_store.create(user.id, &fields.name).await?;

    info!(
        id_sessao = sessao.id_sessao,
        user_id = user.id,
        "Session created"
    );

    Ok((StatusCode::CREATED, Json(sessao)))
}

/// Get one of the caller's sessions
pub async fn get_sessao(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> ApiResult<Json<Sessao>> {
    let sessao = state
        .sessao_store
        .find_owned(id, user.id)
        .await?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(sessao))
}

/// Replace one of the caller's sessions; ownership stays with the caller
pub async fn update_sessao(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<SessaoRequest>, ApiError>,
) -> ApiResult<Json<Sessao>> {
    state
        .sessao_store
        .find_owned(id, user.id)
        .await?
        .ok_or_else(ApiError::not_found)?;

    let fields = payload.validate()?;

    let sessao = state
        .sessao_store
        .update_owned(id, user.id, &fields.name)
        .await?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(sessao))
}

/// Delete one of the caller's sessions
pub async fn delete_sessao(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> ApiResult<StatusCode> {
    if !state.sessao_store.delete_owned(id, user.id).await? {
        return Err(ApiError::not_found());
    }

    info!(id_sessao = id, user_id = user.id, "Session deleted");
    Ok(StatusCode::NO_CONTENT)
}
