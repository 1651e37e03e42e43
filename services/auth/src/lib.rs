//! Token service
//!
//! Exchanges `crud_user` credentials for a JWT access/refresh pair and
//! refreshes access tokens. The API service verifies what this one issues.

pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::AppState;
