/*!
 * Error types for the l10nmate application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with provider APIs
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// The provider answered but the completion carried no text
    #[error("Provider returned an empty completion")]
    EmptyResponse,
}

/// Errors that abort the reconciliation of a single file/target-language pair
#[derive(Error, Debug)]
pub enum ReconcileError {
    /// The provider answered, but not with the structured content that was sent
    #[error("Translated response for batch {batch} is not a JSON object: {reason}")]
    MalformedResponse {
        /// 1-based index of the offending batch
        batch: usize,
        /// Why the response was rejected
        reason: String,
    },

    /// The reconciled document could not be rendered
    #[error("Failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Invalid or incomplete configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from reconciliation
    #[error("Reconciliation error: {0}")]
    Reconcile(#[from] ReconcileError),
}

// File utilities report through anyhow
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::File(format!("{:#}", error))
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
