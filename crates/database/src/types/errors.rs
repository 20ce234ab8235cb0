//! Error types for the database layer

use thiserror::Error;

/// General database error
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    ConnectionError(String),

    #[error("Database migration error: {0}")]
    MigrationError(String),

    #[error("Database query error: {0}")]
    QueryError(String),
}

/// Listing-specific database errors
#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Listing not found")]
    ListingNotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Chat-transcript-specific database errors
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}
