//! # Command Error Type
//!
//! The single error type every command returns.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in tote                                   │
//! │                                                                         │
//! │  tote increment 42                                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, CommandError>                                         │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  CartError::ProductNotFound("42") ──┐                            │  │
//! │  │  CartError::Remote(Timeout)  ───────┼──► CommandError ─────────► │  │
//! │  │  CartError::Store(QueryFailed) ─────┘                            │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stdout: { "code": "NOT_FOUND", "message": "Product not found: 42" }   │
//! │  exit status: 1                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tote_cart::CartError;
use tote_core::ValidationError;
use tote_remote::RemoteError;
use tote_store::StoreError;

/// Result type for commands.
pub type CommandResult<T> = Result<T, CommandError>;

/// Error printed when a command fails.
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CommandError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product API has no such record
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Product API unreachable or answered with an error
    RemoteError,

    /// Local store or persisted cart failed
    StorageError,

    /// Configuration is missing or invalid
    ConfigError,

    /// Anything else
    Internal,
}

impl CommandError {
    /// Creates a new command error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CommandError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        CommandError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        CommandError::new(ErrorCode::ConfigError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        CommandError::new(ErrorCode::Internal, message)
    }
}

/// Converts cart errors to command errors.
impl From<CartError> for CommandError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::ProductNotFound(id) => {
                CommandError::new(ErrorCode::NotFound, format!("Product not found: {}", id))
            }
            CartError::Validation(e) => CommandError::from(e),
            CartError::Remote(e) => CommandError::from(e),
            CartError::Store(e) => CommandError::from(e),
            CartError::Persistence(e) => {
                tracing::error!("Stored cart is unreadable: {}", e);
                CommandError::new(
                    ErrorCode::StorageError,
                    format!("Stored cart is unreadable: {}", e),
                )
            }
            CartError::NotRunning => CommandError::internal("Cart manager is not running"),
            e @ (CartError::InvalidConfig(_) | CartError::ConfigLoadFailed(_)) => {
                CommandError::config(e.to_string())
            }
        }
    }
}

impl From<ValidationError> for CommandError {
    fn from(err: ValidationError) -> Self {
        CommandError::validation(err.to_string())
    }
}

impl From<RemoteError> for CommandError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::InvalidUrl(e) => CommandError::config(format!("Invalid API URL: {}", e)),
            other => CommandError::new(ErrorCode::RemoteError, other.to_string()),
        }
    }
}

impl From<StoreError> for CommandError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::QueryFailed(e) | StoreError::Internal(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Store operation failed: {}", e);
                CommandError::new(ErrorCode::StorageError, "Local storage operation failed")
            }
            other => CommandError::new(ErrorCode::StorageError, other.to_string()),
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::new(ErrorCode::StorageError, err.to_string())
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        CommandError::internal(format!("Failed to encode output: {}", err))
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for CommandError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let err = CommandError::from(CartError::ProductNotFound("42".into()));
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            serde_json::json!({"code": "NOT_FOUND", "message": "Product not found: 42"})
        );
    }

    #[test]
    fn test_cart_error_codes() {
        let code = |err: CartError| CommandError::from(err).code;

        assert_eq!(
            code(CartError::Validation(ValidationError::Required { field: "id".into() })),
            ErrorCode::ValidationError
        );
        assert_eq!(code(CartError::Remote(RemoteError::Timeout(100))), ErrorCode::RemoteError);
        assert_eq!(code(CartError::Store(StoreError::PoolExhausted)), ErrorCode::StorageError);
        assert_eq!(code(CartError::Persistence("eof".into())), ErrorCode::StorageError);
        assert_eq!(code(CartError::InvalidConfig("key".into())), ErrorCode::ConfigError);
        assert_eq!(code(CartError::NotRunning), ErrorCode::Internal);
    }

    #[test]
    fn test_invalid_url_is_config_error() {
        let err = CommandError::from(RemoteError::InvalidUrl("relative URL".into()));
        assert_eq!(err.code, ErrorCode::ConfigError);
    }

    #[test]
    fn test_query_failure_hides_details() {
        let err = CommandError::from(StoreError::QueryFailed("no such table: kv_store".into()));
        assert_eq!(err.message, "Local storage operation failed");
    }
}
