//! # Error Types
//!
//! Domain-specific error types for tote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tote-core (this file)                                                 │
//! │  ├── CoreError        - Domain errors                                  │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  tote-store   └── StoreError   - Key-value store failures              │
//! │  tote-remote  └── RemoteError  - Product API failures                  │
//! │  tote-cart    └── CartError    - What cart handle callers see          │
//! │  apps/cli     └── CommandError - Serialized {code, message}            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CartError → CommandError          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product with this identifier exists.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// A stored cart snapshot could not be decoded.
    ///
    /// ## When This Occurs
    /// - The stored value is not JSON
    /// - The stored value is JSON but neither a snapshot nor a single product
    #[error("Malformed cart snapshot: {0}")]
    MalformedSnapshot(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value is outside the range that can be represented.
    #[error("{field} is out of range")]
    OutOfRange { field: String },

    /// Invalid format (e.g. a price that is not a finite number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
