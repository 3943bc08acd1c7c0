//! Error types for Pantry core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these to
//! user-facing messages and exit codes.

use thiserror::Error;

/// Result type alias for Pantry operations.
pub type Result<T> = std::result::Result<T, PantryError>;

/// Core error type for Pantry operations.
#[derive(Debug, Error)]
pub enum PantryError {
    /// The document store could not be reached or rejected the operation
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A photo could not be written to the blob store
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Stored data that cannot be read back
    #[error("Corrupt document: {0}")]
    Corrupt(String),
}

impl From<rusqlite::Error> for PantryError {
    fn from(err: rusqlite::Error) -> Self {
        PantryError::StoreUnavailable(format!("SQLite error: {}", err))
    }
}
