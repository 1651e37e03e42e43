//! User repository for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::PgPool;
use tracing::info;

use super::UserStore;
use crate::models::{NewUser, User};

/// User repository backed by `crud_user`
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn username_exists(&self, username: &str) -> DatabaseResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM crud_user WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create(&self, new_user: &NewUser, password_hash: &str) -> DatabaseResult<User> {
        info!("Creating new user: {}", new_user.username);

        // Privilege flags are fixed here and never read from the request
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO crud_user
                (username, email, password, first_name, last_name,
                 is_staff, is_superuser, is_active, date_joined)
            VALUES ($1, $2, $3, $4, $5, FALSE, FALSE, TRUE, NOW())
            RETURNING id, username, email, first_name, last_name, password,
                      is_staff, is_superuser, is_active, date_joined,
                      last_login, birth_date
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(password_hash)
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}
