//! Classification service error types.

use thiserror::Error;

/// Errors that can occur while talking to the classification service.
///
/// All of these are recovered at batch granularity: the failing batch
/// contributes zero candidates and the run continues.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// No API key is configured in the expected environment variable.
    #[error("API key not found: environment variable '{0}' is not set")]
    MissingApiKey(String),

    /// The HTTP request failed outright.
    #[error("Classification request failed: {0}")]
    RequestFailed(String),

    /// The service answered with a non-success status.
    #[error("Classification service returned status {status}: {body}")]
    ServiceError { status: u16, body: String },

    /// The reply could not be parsed as structured results. Carries a
    /// truncated preview of the offending content for diagnosis.
    #[error("Failed to parse classification response: {reason} (preview: {preview})")]
    ResponseParse { reason: String, preview: String },
}

/// Result type for classifier operations.
pub type Result<T> = std::result::Result<T, ClassifierError>;
