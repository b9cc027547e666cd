//! Custom error types for the common library
//!
//! This module defines the error type returned by the document store and
//! the database lifecycle helpers.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred while creating the document table
    #[error("Database schema error: {0}")]
    Schema(#[source] SqlxError),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),

    /// A document could not be converted to or from JSON
    #[error("Document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A document or filter was not a JSON object
    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
