//! Application state shared across handlers

use common::jwt::JwtService;
use sqlx::PgPool;
use std::sync::Arc;

use crate::repositories::{
    MessageRepository, MessageStore, SessaoRepository, SessaoStore, UserRepository, UserStore,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub jwt_service: JwtService,
    pub user_store: Arc<dyn UserStore>,
    pub sessao_store: Arc<dyn SessaoStore>,
    pub message_store: Arc<dyn MessageStore>,
}

impl AppState {
    /// State backed by the PostgreSQL repositories
    pub fn new(pool: PgPool, jwt_service: JwtService) -> Self {
        Self {
            jwt_service,
            user_store: Arc::new(UserRepository::new(pool.clone())),
            sessao_store: Arc::new(SessaoRepository::new(pool.clone())),
            message_store: Arc::new(MessageRepository::new(pool)),
        }
    }
}
