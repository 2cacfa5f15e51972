//! # Cart Error Types
//!
//! The error every `CartHandle` call returns.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │     Domain      │  │  Collaborators  │  │     Lifecycle           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │ ProductNotFound │  │  Remote         │  │  NotRunning             │ │
//! │  │ Validation      │  │  Store          │  │                         │ │
//! │  │                 │  │  Persistence    │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │  Configuration  │                                                   │
//! │  │                 │                                                   │
//! │  │ InvalidConfig   │                                                   │
//! │  │ ConfigLoadFailed│                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use tote_core::{CoreError, ValidationError};
use tote_remote::RemoteError;
use tote_store::StoreError;

/// Result type alias for cart operations.
pub type CartResult<T> = Result<T, CartError>;

/// Cart manager errors.
#[derive(Debug, Error)]
pub enum CartError {
    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// The product API has no record for this identifier.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The item was rejected before any call was made.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // =========================================================================
    // Collaborator Errors
    // =========================================================================
    /// Product API call failed.
    #[error("Product API error: {0}")]
    Remote(#[from] RemoteError),

    /// Local key-value store failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Persisted cart value could not be encoded or decoded.
    #[error("Persistence error: {0}")]
    Persistence(String),

    // =========================================================================
    // Lifecycle Errors
    // =========================================================================
    /// The manager task has stopped; the handle can no longer be used.
    #[error("Cart manager is not running")]
    NotRunning,

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Configuration values failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read or parsed.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<CoreError> for CartError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => CartError::ProductNotFound(id),
            CoreError::MalformedSnapshot(reason) => CartError::Persistence(reason),
            CoreError::Validation(err) => CartError::Validation(err),
        }
    }
}

impl From<serde_json::Error> for CartError {
    fn from(err: serde_json::Error) -> Self {
        CartError::Persistence(err.to_string())
    }
}

impl From<std::io::Error> for CartError {
    fn from(err: std::io::Error) -> Self {
        CartError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for CartError {
    fn from(err: toml::de::Error) -> Self {
        CartError::ConfigLoadFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl CartError {
    /// Returns true if the failure was transient and repeating the call may succeed.
    ///
    /// Nothing in the manager retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            CartError::Remote(err) => err.is_retryable(),
            CartError::Store(StoreError::PoolExhausted) => true,
            _ => false,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CartError::InvalidConfig(_) | CartError::ConfigLoadFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(CartError::Remote(RemoteError::Timeout(500)).is_retryable());
        assert!(CartError::Store(StoreError::PoolExhausted).is_retryable());

        assert!(!CartError::ProductNotFound("1".into()).is_retryable());
        assert!(!CartError::NotRunning.is_retryable());
        assert!(!CartError::Remote(RemoteError::Decode("eof".into())).is_retryable());
    }

    #[test]
    fn test_core_error_mapping() {
        let err: CartError = CoreError::ProductNotFound("7".into()).into();
        assert!(matches!(err, CartError::ProductNotFound(ref id) if id == "7"));

        let err: CartError = CoreError::MalformedSnapshot("not json".into()).into();
        assert!(matches!(err, CartError::Persistence(_)));
    }

    #[test]
    fn test_config_errors() {
        assert!(CartError::InvalidConfig("key".into()).is_config_error());
        assert!(!CartError::NotRunning.is_config_error());
    }
}
