//! CRUD service for user registration, chat sessions and their messages

pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

pub use routes::create_router;
pub use state::AppState;
