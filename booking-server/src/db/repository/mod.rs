//! Repository Module
//!
//! CRUD operations over the SQLite pool. Repositories are plain async
//! functions taking `&SqlitePool`; transactional flows live in the
//! booking manager.

// Catalog
pub mod area;
pub mod dining_table;
pub mod menu_item;
pub mod time_slot;

// Bookings
pub mod reservation;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        // Surface unique-index violations so callers can treat them as
        // booking conflicts rather than opaque database failures.
        if let sqlx::Error::Database(db_err) = &err
            && db_err.kind() == sqlx::error::ErrorKind::UniqueViolation
        {
            return RepoError::Conflict(db_err.message().to_string());
        }
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
