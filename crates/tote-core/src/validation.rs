//! # Validation Module
//!
//! Input checks for items entering the cart.
//!
//! ## Where Validation Runs
//! ```text
//! add_to_cart(item)
//!      │
//!      ▼
//! validate_item(&item) ← THIS MODULE
//!      │
//!      ├── invalid? → CartError::Validation, nothing sent or stored
//!      │
//!      └── OK → POST /products → store → append
//! ```
//!
//! Duplicate identifiers are deliberately not checked here.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::CartItem;
use crate::{MAX_ID_LEN, MAX_TITLE_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates an item identifier: non-empty after trimming, bounded length.
///
/// ```rust
/// use tote_core::validation::validate_id;
///
/// assert!(validate_id("sku-1").is_ok());
/// assert!(validate_id("   ").is_err());
/// ```
pub fn validate_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.chars().count() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_ID_LEN,
        });
    }

    Ok(())
}

/// Validates a display title. Empty titles are allowed.
pub fn validate_title(title: &str) -> ValidationResult<()> {
    if title.trim().chars().count() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

/// Validates a quantity. Zero is allowed on add.
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a complete item before it is added.
pub fn validate_item(item: &CartItem) -> ValidationResult<()> {
    validate_id(&item.id)?;
    validate_title(&item.title)?;

    if item.price.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        });
    }

    if item.price > Money::MAX {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
        });
    }

    validate_quantity(item.quantity)?;

    if item.price.checked_multiply_quantity(item.quantity).is_none() {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}
