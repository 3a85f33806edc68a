//! User-facing analysis failures and their classification.

use serde::Serialize;
use thiserror::Error;

/// A failure raised by the transport or the inference endpoint itself.
///
/// Carries the underlying message verbatim; classification into an
/// [`AnalysisError`] only inspects this text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BackendError {
    /// HTTP status code, when the endpoint answered at all.
    pub status_code: Option<u16>,
    pub message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status_code: None,
            message: message.into(),
        }
    }

    pub fn with_status(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code: Some(status_code),
            message: message.into(),
        }
    }
}

/// The four failure categories surfaced to the health worker.
///
/// Each carries a fixed message; none is retried automatically.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnalysisError {
    #[error("API authentication failed. Please check your API key.")]
    Authentication,

    #[error("API rate limit exceeded. Please try again in a few minutes.")]
    RateLimited,

    #[error("API service temporarily unavailable. Please try again later.")]
    ServiceUnavailable,

    #[error("Failed to analyze image. Please check your internet connection and try again.")]
    Connectivity,
}

impl AnalysisError {
    /// Maps an underlying failure message to a category.
    ///
    /// Matching is case-sensitive substring containment, checked in order:
    /// authentication, rate limit, service, then the connectivity catch-all.
    pub fn classify(message: &str) -> Self {
        if message.contains("401") || message.contains("authentication") {
            Self::Authentication
        } else if message.contains("429") || message.contains("rate limit") {
            Self::RateLimited
        } else if message.contains("500") || message.contains("server") {
            Self::ServiceUnavailable
        } else {
            Self::Connectivity
        }
    }
}

impl From<BackendError> for AnalysisError {
    fn from(err: BackendError) -> Self {
        Self::classify(&err.message)
    }
}
