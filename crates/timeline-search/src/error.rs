//! Error types for timeline search.

use thiserror::Error;

/// How an error should be treated by the fetch pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Server-side fault that is safe to retry.
    Transient,
    /// Aborts the command.
    Fatal,
    /// Bad user input, surfaced before anything is fetched.
    Validation,
}

/// Errors that can occur while searching timelines.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The remote service answered with a 5xx status.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The remote service rejected the request.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP request failed before a response was received.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Timestamp in a response could not be parsed.
    #[error("Invalid timestamp '{value}': {source}")]
    Timestamp {
        value: String,
        source: chrono::ParseError,
    },

    /// A page kept failing with transient errors.
    #[error("Page {page} failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        page: u32,
        attempts: u32,
        source: Box<SearchError>,
    },

    /// Query is not a valid pattern.
    #[error("Invalid query pattern: {0}")]
    InvalidQuery(#[from] regex::Error),

    /// Screen name is empty.
    #[error("Invalid screen name '{0}'")]
    InvalidScreenName(String),

    /// Page number or page size out of range.
    #[error("Invalid page request: page {page}, size {size}")]
    InvalidPage { page: u32, size: u32 },

    /// Credential profile could not be loaded.
    #[error("Profile error: {0}")]
    Profile(String),
}

impl SearchError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Server { .. } => ErrorKind::Transient,
            Self::InvalidQuery(_) | Self::InvalidScreenName(_) | Self::InvalidPage { .. } => {
                ErrorKind::Validation
            }
            Self::Api { .. }
            | Self::Http(_)
            | Self::Serialization(_)
            | Self::Timestamp { .. }
            | Self::RetriesExhausted { .. }
            | Self::Profile(_) => ErrorKind::Fatal,
        }
    }

    /// Whether the error is worth retrying.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        self.kind() == ErrorKind::Transient
    }
}
