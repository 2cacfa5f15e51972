//! # Domain Types
//!
//! The cart line record and the small value types built around it.
//!
//! ## Wire Record
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │  CartItem (JSON)                              │
//! │  ─────────────────────────────────────────    │
//! │  id         "1"         unique by intent      │
//! │  title      "Shirt"                           │
//! │  image_url  "https://…"                       │
//! │  price      10          major units           │
//! │  quantity   1                                 │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! The same shape is exchanged with the product API and written to the
//! local store, so no DTO layer sits between them. Fields the record does
//! not name are kept in `extra` and written back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Cart Item
// =============================================================================

/// A product line entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    /// Product identifier.
    pub id: String,

    /// Display title.
    #[serde(default)]
    pub title: String,

    /// Image reference shown next to the line.
    #[serde(default)]
    pub image_url: String,

    /// Unit price, encoded as a JSON number in major units.
    #[ts(as = "f64")]
    pub price: Money,

    /// Quantity in cart. Never clamped at zero by the record itself.
    pub quantity: i64,

    /// Any other fields the product API sent.
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

impl CartItem {
    /// Creates a cart item.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: Money,
        quantity: i64,
    ) -> Self {
        CartItem {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
            quantity,
            extra: Map::new(),
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }

    /// Returns a copy with quantity raised by one. Saturates at `i64::MAX`.
    pub fn incremented(mut self) -> Self {
        self.quantity = self.quantity.saturating_add(1);
        self
    }

    /// Returns a copy with quantity lowered by one. Saturates at `i64::MIN`.
    pub fn decremented(mut self) -> Self {
        self.quantity = self.quantity.saturating_sub(1);
        self
    }
}

// =============================================================================
// Lookup
// =============================================================================

/// Outcome of a remote product lookup.
///
/// Absence is a value, not an error: callers must match on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The product record exists.
    Found(CartItem),

    /// No record for the requested identifier.
    NotFound,
}

impl Lookup {
    /// Returns the found item, if any.
    pub fn into_option(self) -> Option<CartItem> {
        match self {
            Lookup::Found(item) => Some(item),
            Lookup::NotFound => None,
        }
    }

    /// Checks if the lookup found a record.
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }
}

impl From<Option<CartItem>> for Lookup {
    fn from(item: Option<CartItem>) -> Self {
        match item {
            Some(item) => Lookup::Found(item),
            None => Lookup::NotFound,
        }
    }
}

// =============================================================================
// Cart Totals
// =============================================================================

/// Summary figures for a cart snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartTotals {
    /// Number of lines (duplicates counted separately).
    pub item_count: usize,

    /// Sum of line quantities.
    pub total_quantity: i64,

    /// Sum of line totals.
    #[ts(as = "f64")]
    pub subtotal: Money,
}
