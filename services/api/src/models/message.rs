//! Message model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::validation::{self, FieldErrors};

/// Row of `messages`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Message {
    pub id: i32,
    pub id_sessao: Option<i32>,
    pub key_id: i32,
    pub tex: Option<String>,
    /// Set once on insert; the column is spelled `timestap` in the schema
    #[sqlx(rename = "timestap")]
    pub timestamp: DateTime<Utc>,
    pub media_url: Option<String>,
    pub media_type: Option<String>,
    pub media_size: Option<i32>,
    pub media_name: Option<String>,
    pub media_duration: Option<i32>,
}

/// Body of `POST /messages/` and `PUT /messages/{id}/`
///
/// `id` and `timestamp` are server-assigned and not part of the payload.
/// Values stay raw JSON until `validate()` checks them field by field.
#[derive(Debug, Default, Deserialize)]
pub struct MessageRequest {
    #[serde(default, deserialize_with = "validation::present")]
    pub id_sessao: Option<Value>,
    #[serde(default, deserialize_with = "validation::present")]
    pub key_id: Option<Value>,
    #[serde(default, deserialize_with = "validation::present")]
    pub tex: Option<Value>,
    #[serde(default, deserialize_with = "validation::present")]
    pub media_url: Option<Value>,
    #[serde(default, deserialize_with = "validation::present")]
    pub media_type: Option<Value>,
    #[serde(default, deserialize_with = "validation::present")]
    pub media_size: Option<Value>,
    #[serde(default, deserialize_with = "validation::present")]
    pub media_name: Option<Value>,
    #[serde(default, deserialize_with = "validation::present")]
    pub media_duration: Option<Value>,
}

/// Validated message columns
#[derive(Debug, Clone, PartialEq)]
pub struct MessageFields {
    pub id_sessao: Option<i32>,
    pub key_id: i32,
    pub tex: Option<String>,
    pub media_url: Option<String>,
    pub media_type: Option<String>,
    pub media_size: Option<i32>,
    pub media_name: Option<String>,
    pub media_duration: Option<i32>,
}

impl MessageRequest {
    /// Check the payload shape; session existence is checked by the handler
    pub fn validate(self) -> Result<MessageFields, FieldErrors> {
        let mut errors = FieldErrors::new();

        let key_id = errors.check("key_id", validation::required_int32(self.key_id));
        let id_sessao = errors
            .check("id_sessao", validation::nullable_int32(self.id_sessao))
            .flatten();
        let tex = errors
            .check("tex", validation::nullable_text(self.tex))
            .flatten();
        let media_url = errors
            .check("media_url", validation::nullable_text(self.media_url))
            .flatten();
        let media_type = errors
            .check("media_type", validation::nullable_text(self.media_type))
            .flatten();
        let media_size = errors
            .check("media_size", validation::nullable_int32(self.media_size))
            .flatten();
        let media_name = errors
            .check("media_name", validation::nullable_text(self.media_name))
            .flatten();
        let media_duration = errors
            .check("media_duration", validation::nullable_int32(self.media_duration))
            .flatten();

        match key_id {
            Some(key_id) => errors.into_result(MessageFields {
                id_sessao,
                key_id,
                tex,
                media_url,
                media_type,
                media_size,
                media_name,
                media_duration,
            }),
            None => Err(errors),
        }
    }
}
