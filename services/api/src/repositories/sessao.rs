//! Session repository for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::PgPool;

use super::SessaoStore;
use crate::models::Sessao;

/// Session repository backed by `sessao`
#[derive(Clone)]
pub struct SessaoRepository {
    pool: PgPool,
}

impl SessaoRepository {
    /// Create a new session repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessaoStore for SessaoRepository {
    async fn list_by_owner(&self, owner: i32) -> DatabaseResult<Vec<Sessao>> {
        let sessions = sqlx::query_as::<_, Sessao>(
            r#"
            SELECT id_sessao, name, id_user
            FROM sessao
            WHERE id_user = $1
            ORDER BY id_sessao
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }

    async fn create(&self, owner: i32, name: &str) -> DatabaseResult<Sessao> {
        let sessao = sqlx::query_as::<_, Sessao>(
            r#"
            INSERT INTO sessao (name, id_user)
            VALUES ($1, $2)
            RETURNING id_sessao, name, id_user
            "#,
        )
        .bind(name)
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(sessao)
    }

    async fn find_owned(&self, id_sessao: i32, owner: i32) -> DatabaseResult<Option<Sessao>> {
        let sessao = sqlx::query_as::<_, Sessao>(
            r#"
            SELECT id_sessao, name, id_user
            FROM sessao
            WHERE id_sessao = $1 AND id_user = $2
            "#,
        )
        .bind(id_sessao)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sessao)
    }

    async fn update_owned(
        &self,
        id_sessao: i32,
        owner: i32,
        name: &str,
    ) -> DatabaseResult<Option<Sessao>> {
        let sessao = sqlx::query_as::<_, Sessao>(
            r#"
            UPDATE sessao
            SET name = $3, id_user = $2
            WHERE id_sessao = $1 AND id_user = $2
            RETURNING id_sessao, name, id_user
            "#,
        )
        .bind(id_sessao)
        .bind(owner)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sessao)
    }

    async fn delete_owned(&self, id_sessao: i32, owner: i32) -> DatabaseResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM sessao
            WHERE id_sessao = $1 AND id_user = $2
            "#,
        )
        .bind(id_sessao)
        .bind(owner)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, id_sessao: i32) -> DatabaseResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM sessao WHERE id_sessao = $1)",
        )
        .bind(id_sessao)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
