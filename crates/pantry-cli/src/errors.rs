//! CLI error types for structured error handling.
//!
//! This module provides typed errors that map to specific exit codes,
//! enabling consistent error handling across the CLI.

use std::fmt;

use pantry_core::PantryError;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (config, store)
    NotFound { message: String, hint: String },

    /// Invalid user input
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, hint } => write!(f, "{}\n{}", message, hint),
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    /// Create a NotFound error with message and hint.
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }
}

/// Exit code for a core error.
pub fn pantry_exit_code(err: &PantryError) -> i32 {
    match err {
        PantryError::NotFound(_) => exit_codes::NOT_FOUND,
        PantryError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        PantryError::UploadFailed(_) => exit_codes::UPLOAD_FAILED,
        PantryError::StoreUnavailable(_) => exit_codes::STORE_UNAVAILABLE,
        PantryError::Corrupt(_) => exit_codes::FAILURE,
    }
}

/// Exit code for any error surfaced by a command handler.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    if let Some(core_err) = err.downcast_ref::<PantryError>() {
        return pantry_exit_code(core_err);
    }
    exit_codes::FAILURE
}

/// Add a hint for core errors the user can act on.
pub fn hint_for(err: &anyhow::Error) -> Option<&'static str> {
    match err.downcast_ref::<PantryError>()? {
        PantryError::NotFound(message) if message.starts_with("Item") => {
            Some("Hint: Run `pantry list` to see stocked items.")
        }
        PantryError::NotFound(_) => Some("Hint: Run `pantry init` to create a store."),
        PantryError::UploadFailed(_) => {
            Some("Hint: Check that the photo directory in the config is writable.")
        }
        _ => None,
    }
}
