//! Error types for the drivelib library.

use thiserror::Error;

/// Main error type for drivelib operations.
#[derive(Error, Debug)]
pub enum DriveError {
    /// Network request error.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Local filesystem I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// No usable credentials, or the authentication flow failed.
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Caller input was rejected (not a directory, no extractable file id, ...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The Drive API returned a non-success status with an error body.
    #[error("API error: {code} - {message}")]
    ApiError { code: u16, message: String },

    /// A create/upload/download call failed or returned an unusable response.
    #[error("Transfer error: {0}")]
    TransferError(String),
}

/// Result type alias for drivelib operations.
pub type Result<T> = std::result::Result<T, DriveError>;
