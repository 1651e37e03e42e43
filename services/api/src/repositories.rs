//! Repositories for database operations
//!
//! Handlers talk to storage through the traits below. The PostgreSQL
//! implementations live in the submodules. Every session query that touches
//! a single owner takes that owner as a required argument, so the ownership
//! predicate cannot be left out at the call site.

use async_trait::async_trait;
use common::error::DatabaseResult;

use crate::models::{Message, MessageFields, NewUser, Sessao, User};

pub mod message;
pub mod sessao;
pub mod user;

pub use message::MessageRepository;
pub use sessao::SessaoRepository;
pub use user::UserRepository;

/// Storage for registered users
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn username_exists(&self, username: &str) -> DatabaseResult<bool>;

    /// Insert a user; `password_hash` is the already hashed password
    async fn create(&self, new_user: &NewUser, password_hash: &str) -> DatabaseResult<User>;
}

/// Storage for chat sessions, scoped by owner
#[async_trait]
pub trait SessaoStore: Send + Sync {
    async fn list_by_owner(&self, owner: i32) -> DatabaseResult<Vec<Sessao>>;

    async fn create(&self, owner: i32, name: &str) -> DatabaseResult<Sessao>;

    async fn find_owned(&self, id_sessao: i32, owner: i32) -> DatabaseResult<Option<Sessao>>;

    /// Rename an owned session; `None` when no owned row matched
    async fn update_owned(
        &self,
        id_sessao: i32,
        owner: i32,
        name: &str,
    ) -> DatabaseResult<Option<Sessao>>;

    /// `false` when no owned row matched
    async fn delete_owned(&self, id_sessao: i32, owner: i32) -> DatabaseResult<bool>;

    /// Unscoped existence check used to validate message references
    async fn exists(&self, id_sessao: i32) -> DatabaseResult<bool>;
}

/// Storage for messages
#[async_trait]
pub trait MessageStore: Send + Sync {
    async fn list(&self) -> DatabaseResult<Vec<Message>>;

    async fn list_by_sessao(&self, id_sessao: i32) -> DatabaseResult<Vec<Message>>;

    async fn find(&self, id: i32) -> DatabaseResult<Option<Message>>;

    async fn create(&self, fields: &MessageFields) -> DatabaseResult<Message>;

    /// Replace every client-writable column; `None` when the row is missing
    async fn update(&self, id: i32, fields: &MessageFields) -> DatabaseResult<Option<Message>>;

    async fn delete(&self, id: i32) -> DatabaseResult<bool>;
}
