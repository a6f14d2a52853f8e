//! Error types for jotter.

use thiserror::Error;

/// Result type alias using jotter's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for jotter infrastructure operations.
///
/// Absence of a note is never an `Error`; repositories report it through
/// `Option` or `bool`.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
