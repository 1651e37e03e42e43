//! Application state shared across handlers

use common::jwt::JwtService;
use sqlx::PgPool;
use std::sync::Arc;

use crate::repositories::{CredentialStore, UserRepository};

#[derive(Clone)]
pub struct AppState {
    pub jwt_service: JwtService,
    pub credential_store: Arc<dyn CredentialStore>,
}

impl AppState {
    pub fn new(pool: PgPool, jwt_service: JwtService) -> Self {
        Self {
            jwt_service,
            credential_store: Arc::new(UserRepository::new(pool)),
        }
    }
}
