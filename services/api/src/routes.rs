//! API service routes

use axum::{
    Json, Router, middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use crate::{middleware::auth_middleware, state::AppState};

pub mod messages;
pub mod sessao;
pub mod users;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route(
            "/sessao/",
            get(sessao::list_sessoes).post(sessao::create_sessao),
        )
        .route(
            "/sessao/:id/",
            get(sessao::get_sessao)
                .put(sessao::update_sessao)
                .delete(sessao::delete_sessao),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/users/", post(users::create_user))
        .route(
            "/messages/",
            get(messages::list_messages).post(messages::create_message),
        )
        .route(
            "/messages/:id/",
            get(messages::get_message)
                .put(messages::update_message)
                .delete(messages::delete_message),
        )
        .route(
            "/messages/session/:id_sessao/",
            get(messages::list_messages_by_sessao),
        )
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "api-service"
    }))
}
