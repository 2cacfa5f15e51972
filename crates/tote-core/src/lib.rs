//! # tote-core: Pure Cart Logic for Tote
//!
//! This crate holds the cart's data model and every list operation the cart
//! manager performs, as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Tote Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (tote)                              │   │
//! │  │        list, add, increment, decrement, totals                  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CartHandle                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tote-cart (actor)                            │   │
//! │  └──────────┬──────────────────┬──────────────────┬────────────────┘   │
//! │             │                  │                  │                     │
//! │  ┌──────────▼───────┐ ┌────────▼─────────┐ ┌──────▼──────────────┐     │
//! │  │ ★ tote-core ★    │ │   tote-store     │ │   tote-remote       │     │
//! │  │ CartItem, Money  │ │   SQLite KV      │ │   /products API     │     │
//! │  │ Cart, validation │ │                  │ │                     │     │
//! │  └──────────────────┘ └──────────────────┘ └─────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - The `CartItem` record, `Lookup`, `CartTotals`
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - The ordered item list and its pure transitions
//! - [`error`] - Domain error types
//! - [`validation`] - Input checks run before an item is added
//!
//! ## Example Usage
//!
//! ```rust
//! use tote_core::{Cart, CartItem, Money};
//!
//! let mut cart = Cart::new();
//! cart.push(CartItem::new("1", "Shirt", "", Money::from_cents(1000), 1));
//!
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.totals().subtotal.cents(), 1000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::Cart;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of an item title.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of an item identifier.
pub const MAX_ID_LEN: usize = 100;
