// src/error.rs
//! Application error types with structured error handling.
//!
//! Each variant names a distinct failure mode of the export run. Most of
//! these are never fatal: pagination truncates on request failures, single
//! attachment downloads are dropped, and the theme stage is skipped — the
//! run always proceeds to the manifest.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Zendesk API returned HTTP {status} for {url}")]
    ZendeskService { status: u16, url: String },

    #[error("Malformed response from {url}: {source}")]
    MalformedResponse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid attachment link pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Whether this error is a Zendesk-side HTTP error (as opposed to a
    /// transport, parsing, or local failure).
    pub fn is_service_error(&self) -> bool {
        matches!(self, Self::ZendeskService { .. })
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
