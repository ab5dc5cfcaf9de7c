//! Error types for ratiba.

use thiserror::Error;

/// Errors that can occur in ratiba operations.
#[derive(Error, Debug)]
pub enum RatibaError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store returned {status}: {message}")]
    Store { status: u16, message: String },

    #[error("Store returned no row for the inserted schedule")]
    EmptyInsert,
}

/// Result type alias for ratiba operations.
pub type RatibaResult<T> = Result<T, RatibaError>;
