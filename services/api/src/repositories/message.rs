//! Message repository for database operations

use async_trait::async_trait;
use common::error::DatabaseResult;
use sqlx::PgPool;

use super::MessageStore;
use crate::models::{Message, MessageFields};

const COLUMNS: &str = "id, id_sessao, key_id, tex, timestap, media_url, media_type, \
                       media_size, media_name, media_duration";

/// Message repository backed by `messages`
#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    /// Create a new message repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    async fn list(&self) -> DatabaseResult<Vec<Message>> {
        let messages =
            sqlx::query_as::<_, Message>(&format!("SELECT {COLUMNS} FROM messages ORDER BY id"))
                .fetch_all(&self.pool)
                .await?;

        Ok(messages)
    }

    async fn list_by_sessao(&self, id_sessao: i32) -> DatabaseResult<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(&format!(
            "SELECT {COLUMNS} FROM messages WHERE id_sessao = $1 ORDER BY id"
        ))
        .bind(id_sessao)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn find(&self, id: i32) -> DatabaseResult<Option<Message>> {
        let message =
            sqlx::query_as::<_, Message>(&format!("SELECT {COLUMNS} FROM messages WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(message)
    }

    async fn create(&self, fields: &MessageFields) -> DatabaseResult<Message> {
        let message = sqlx::query_as::<_, Message>(&format!(
            r#"
            INSERT INTO messages
                (id_sessao, key_id, tex, timestap, media_url, media_type,
                 media_size, media_name, media_duration)
            VALUES ($1, $2, $3, NOW(), $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(fields.id_sessao)
        .bind(fields.key_id)
        .bind(&fields.tex)
        .bind(&fields.media_url)
        .bind(&fields.media_type)
        .bind(fields.media_size)
        .bind(&fields.media_name)
        .bind(fields.media_duration)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    async fn update(&self, id: i32, fields: &MessageFields) -> DatabaseResult<Option<Message>> {
        let message = sqlx::query_as::<_, Message>(&format!(
            r#"
            UPDATE messages
            SET id_sessao = $2, key_id = $3, tex = $4, media_url = $5,
                media_type = $6, media_size = $7, media_name = $8,
                media_duration = $9
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(fields.id_sessao)
        .bind(fields.key_id)
        .bind(&fields.tex)
        .bind(&fields.media_url)
        .bind(&fields.media_type)
        .bind(fields.media_size)
        .bind(&fields.media_name)
        .bind(fields.media_duration)
        .fetch_optional(&self.pool)
        .await?;

        Ok(message)
    }

    async fn delete(&self, id: i32) -> DatabaseResult<bool> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
