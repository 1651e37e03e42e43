//! Credential lookup

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::PgPool;
use tracing::debug;

use crate::models::Credentials;

#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Credentials for an exact username match
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<Credentials>>;
}

/// `crud_user` backed credential store
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for UserRepository {
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<Credentials>> {
        debug!("Finding credentials for user: {}", username);

        let credentials = sqlx::query_as::<_, Credentials>(
            r#"
            SELECT id, username, password, is_active
            FROM crud_user
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credentials)
    }
}
