//! Email input error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while obtaining or decoding raw emails.
#[derive(Error, Debug)]
pub enum EmailError {
    /// The intermediate emails file is missing.
    #[error("Emails file not found: {0}")]
    FileNotFound(PathBuf),

    /// Reading the emails file failed.
    #[error("Failed to read emails file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing the emails file failed.
    #[error("Failed to write emails file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file contents could not be parsed as an email collection,
    /// even after the fallback decode.
    #[error("Failed to parse emails JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    /// The external mail source failed to produce emails.
    #[error("Mail source error: {0}")]
    SourceError(String),
}

/// Result type for email operations.
pub type Result<T> = std::result::Result<T, EmailError>;
