//! API models for request and response payloads
//!
//! Each resource has a row type read from the database, a request type that
//! accepts whatever the client sent, and a `validate` step that turns the
//! request into the values the repositories write.

pub mod message;
pub mod sessao;
pub mod user;

pub use message::{Message, MessageFields, MessageRequest};
pub use sessao::{Sessao, SessaoFields, SessaoRequest};
pub use user::{CreateUserRequest, NewUser, User, UserResponse};
