//! Message handlers
//!
//! These routes are open: no token is required to read or write messages.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::WithRejection;

use crate::{
    error::{ApiError, ApiResult},
    models::{Message, MessageFields, MessageRequest},
    state::AppState,
    validation::FieldErrors,
};

pub const NO_MESSAGES_FOR_SESSION: &str = "No messages found for this session.";

/// Reject a reference to a session that does not exist
async fn ensure_sessao_exists(state: &AppState, fields: &MessageFields) -> ApiResult<()> {
    if let Some(id_sessao) = fields.id_sessao {
        if !state.sessao_store.exists(id_sessao).await? {
            let mut errors = FieldErrors::new();
            errors.add(
                "id_sessao",
                format!("Invalid pk \"{}\" - object does not exist.", id_sessao),
            );
            return Err(errors.into());
        }
    }
    Ok(())
}

/// List every message
pub async fn list_messages(State(state): State<AppState>) -> ApiResult<Json<Vec<Message>>> {
    let messages = state.message_store.list().await?;
    Ok(Json(messages))
}

/// Create a message
pub async fn create_message(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<MessageRequest>, ApiError>,
) -> ApiResult<(StatusCode, Json<Message>)> {
    let fields = payload.validate()?;
    ensure_sessao_exists(&state, &fields).await?;

    let message = state.message_store.create(&fields).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// Get a message by id
pub async fn get_message(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> ApiResult<Json<Message>> {
    let message = state
        .message_store
        .find(id)
        .await?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(message))
}

/// Replace a message
pub async fn update_message(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
    WithRejection(Json(payload), _): WithRejection<Json<MessageRequest>, ApiError>,
) -> ApiResult<Json<Message>> {
    state
        .message_store
        .find(id)
        .await?
        .ok_or_else(ApiError::not_found)?;

    let fields = payload.validate()?;
    ensure_sessao_exists(&state, &fields).await?;

    let message = state
        .message_store
        .update(id, &fields)
        .await?
        .ok_or_else(ApiError::not_found)?;

    Ok(Json(message))
}

/// Delete a message
pub async fn delete_message(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> ApiResult<StatusCode> {
    if !state.message_store.delete(id).await? {
        return Err(ApiError::not_found());
    }

    Ok(StatusCode::NO_CONTENT)
}

/// List the messages of one session
///
/// An empty result is reported as 404, whether or not the session exists.
pub async fn list_messages_by_sessao(
    State(state): State<AppState>,
    WithRejection(Path(id_sessao), _): WithRejection<Path<i32>, ApiError>,
) -> ApiResult<Json<Vec<Message>>> {
    let messages = state.message_store.list_by_sessao(id_sessao).await?;

    if messages.is_empty() {
        return Err(ApiError::NotFound(NO_MESSAGES_FOR_SESSION.to_string()));
    }

    Ok(Json(messages))
}
