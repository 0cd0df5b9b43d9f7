//! # Fetch Errors
//!
//! This module defines the error taxonomy shared by every fetch step. A step can
//! fail in exactly two ways: the request never produced a usable response
//! ([`FetchError::Transport`]) or the response body did not have the expected
//! shape ([`FetchError::Decode`]). Callers treat both the same way; the variant
//! only adds detail to the log entry.

/// Errors that can occur while fetching an entity set.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    /// The request could not be sent, the response could not be read, or the
    /// server answered with a non-success status.
    #[error("API request error: {0}")]
    Transport(String),

    /// The response body did not decode into the expected entity shape.
    #[error("convert error: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, FetchError::Decode(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        FetchError::Transport(e.to_string())
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

/// Result of a single fetch step: the decoded records in server order.
pub type FetchResult<T> = Result<Vec<T>, FetchError>;
