//! # Remote Error Types
//!
//! Error types for product API calls.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Transport (retryable)        Protocol (permanent)                      │
//! │  ─────────────────────        ────────────────────                      │
//! │  ConnectionFailed             InvalidUrl                                │
//! │  Timeout                      Decode                                    │
//! │  Status (5xx)                 Status (4xx)                              │
//! │                               Request                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in the cart manager retries; the categorisation is exposed so
//! callers can decide.

use thiserror::Error;

/// Result type alias for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Product API errors.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Base URL or endpoint could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Could not reach the API.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request exceeded the configured timeout.
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    /// API answered with a non-success status.
    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: String,
        url: String,
        status: u16,
    },

    /// Response body was not a product record.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// Any other request failure.
    #[error("Request failed: {0}")]
    Request(String),
}

impl RemoteError {
    /// Returns true for transient failures where a retry may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            RemoteError::ConnectionFailed(_) | RemoteError::Timeout(_) => true,
            RemoteError::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        RemoteError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for RemoteError {
    fn from(err: url::ParseError) -> Self {
        RemoteError::InvalidUrl(err.to_string())
    }
}
