//! User model and registration payloads

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::validation::{self, FieldErrors};

/// Row of `crud_user`
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// PHC formatted hash, never serialized
    pub password: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub birth_date: Option<NaiveDate>,
}

/// Request for user registration
///
/// Only the fields a client may set are listed; anything else in the body,
/// privilege flags included, is dropped during deserialization.
#[derive(Debug, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default, deserialize_with = "validation::present")]
    pub username: Option<Value>,
    #[serde(default, deserialize_with = "validation::present")]
    pub email: Option<Value>,
    #[serde(default, deserialize_with = "validation::present")]
    pub password: Option<Value>,
    #[serde(default, deserialize_with = "validation::present")]
    pub first_name: Option<Value>,
    #[serde(default, deserialize_with = "validation::present")]
    pub last_name: Option<Value>,
}

/// Validated registration, password still in plaintext
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl CreateUserRequest {
    pub fn validate(self) -> Result<NewUser, FieldErrors> {
        let mut errors = FieldErrors::new();

        let username = errors
            .check("username", validation::required_text(self.username))
            .and_then(|username| {
                errors
                    .check("username", validation::validate_username(&username))
                    .map(|_| username)
            });

        let password = errors
            .check("password", validation::required_text(self.password))
            .and_then(|password| {
                errors
                    .check("password", validation::min_chars(&password, 6))
                    .map(|_| password)
            });

        let email = errors
            .check("email", validation::optional_text(self.email))
            .unwrap_or_default();
        errors.check("email", validation::validate_email(&email));

        let first_name = errors
            .check("first_name", validation::optional_text(self.first_name))
            .unwrap_or_default();
        errors.check("first_name", validation::max_chars(&first_name, 150));

        let last_name = errors
            .check("last_name", validation::optional_text(self.last_name))
            .unwrap_or_default();
        errors.check("last_name", validation::max_chars(&last_name, 150));

        match (username, password) {
            (Some(username), Some(password)) => errors.into_result(NewUser {
                username,
                email,
                password,
                first_name,
                last_name,
            }),
            _ => Err(errors),
        }
    }
}

/// Response for user operations
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}
