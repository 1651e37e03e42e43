//! Custom error types for the common library
//!
//! This module defines the database error taxonomy shared by the services.
//! Constraint violations are kept apart from other query failures so that
//! callers can report them as client errors.

use sqlx::Error as SqlxError;
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred while acquiring or opening a connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// A unique, foreign key, not-null or check constraint rejected the statement
    #[error("Database integrity error: {0}")]
    Integrity(#[source] SqlxError),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

impl From<SqlxError> for DatabaseError {
    fn from(err: SqlxError) -> Self {
        let constraint_violation = match &err {
            SqlxError::Database(db_err) => matches!(
                db_err.kind(),
                ErrorKind::UniqueViolation
                    | ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ),
            _ => false,
        };

        if constraint_violation {
            return DatabaseError::Integrity(err);
        }

        match err {
            SqlxError::PoolTimedOut | SqlxError::PoolClosed | SqlxError::Io(_) => {
                DatabaseError::Connection(err)
            }
            _ => DatabaseError::Query(err),
        }
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
