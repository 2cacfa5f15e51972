//! # Cart
//!
//! The ordered list of cart lines and the pure transitions the cart manager
//! applies to it.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Manager step                Cart transition          Effect            │
//! │  ────────────                ───────────────          ──────            │
//! │  add_to_cart(item) ────────► push(item)          ──► append            │
//! │  increment(id)     ────────► replace(id, item)   ──► swap matching     │
//! │  decrement(id) > 0 ────────► replace(id, item)   ──► swap matching     │
//! │  decrement(id) = 0 ────────► remove(id)          ──► drop matching     │
//! │  restore           ────────► extend(items)       ──► append all        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are not deduplicated: `push` never merges lines, and
//! `replace` / `remove` act on every line sharing the identifier.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{CartItem, CartTotals};

/// The cart: an ordered sequence of lines. Order only matters for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Creates a cart holding the given lines in order.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        Cart { items }
    }

    /// Read-only view of the lines.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Copies the lines out as a snapshot.
    pub fn snapshot(&self) -> Vec<CartItem> {
        self.items.clone()
    }

    /// Appends a line without checking for an existing identifier.
    pub fn push(&mut self, item: CartItem) {
        self.items.push(item);
    }

    /// Appends several lines in order.
    pub fn extend(&mut self, items: impl IntoIterator<Item = CartItem>) {
        self.items.extend(items);
    }

    /// Replaces every line whose identifier equals `id` with `item`.
    ///
    /// Local-only differences on the replaced lines are discarded.
    /// Returns the number of lines replaced.
    pub fn replace(&mut self, id: &str, item: &CartItem) -> usize {
        let mut replaced = 0;
        for line in self.items.iter_mut().filter(|line| line.id == id) {
            *line = item.clone();
            replaced += 1;
        }
        replaced
    }

    /// Removes every line whose identifier equals `id`.
    ///
    /// Returns the number of lines removed.
    pub fn remove(&mut self, id: &str) -> usize {
        let initial_len = self.items.len();
        self.items.retain(|line| line.id != id);
        initial_len - self.items.len()
    }

    /// Returns the first line with this identifier.
    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|line| line.id == id)
    }

    /// Checks whether any line carries this identifier.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Computes summary figures.
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            item_count: self.items.len(),
            total_quantity: self
                .items
                .iter()
                .fold(0i64, |sum, line| sum.saturating_add(line.quantity)),
            subtotal: self.items.iter().map(CartItem::line_total).sum::<Money>(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price_cents: i64, quantity: i64) -> CartItem {
        CartItem::new(id, format!("Product {}", id), "", Money::from_cents(price_cents), quantity)
    }

    #[test]
    fn test_push_keeps_duplicates() {
        let mut cart = Cart::new();
        cart.push(item("1", 1000, 1));
        cart.push(item("1", 1000, 1));

        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_replace_only_touches_matching_lines() {
        let mut cart = Cart::from_items(vec![item("1", 1000, 1), item("2", 500, 3)]);

        let replaced = cart.replace("1", &item("1", 1000, 2));

        assert_eq!(replaced, 1);
        assert_eq!(cart.get("1").unwrap().quantity, 2);
        assert_eq!(cart.get("2").unwrap().quantity, 3);
    }

    #[test]
    fn test_replace_discards_local_fields() {
        let mut local = item("1", 1000, 1);
        local.image_url = "local-only.png".to_string();
        let mut cart = Cart::from_items(vec![local]);

        cart.replace("1", &item("1", 1000, 2));

        assert_eq!(cart.get("1").unwrap().image_url, "");
    }

    #[test]
    fn test_replace_missing_is_noop() {
        let mut cart = Cart::from_items(vec![item("1", 1000, 1)]);
        assert_eq!(cart.replace("9", &item("9", 1, 1)), 0);
        assert_eq!(cart.snapshot(), vec![item("1", 1000, 1)]);
    }

    #[test]
    fn test_remove_drops_all_matching_lines() {
        let mut cart = Cart::from_items(vec![item("1", 1000, 1), item("2", 1, 1), item("1", 1000, 1)]);

        assert_eq!(cart.remove("1"), 2);
        assert_eq!(cart.len(), 1);
        assert!(!cart.contains("1"));
    }

    #[test]
    fn test_totals() {
        let cart = Cart::from_items(vec![item("1", 1000, 2), item("2", 250, 1)]);
        let totals = cart.totals();

        assert_eq!(totals.item_count, 2);
        assert_eq!(totals.total_quantity, 3);
        assert_eq!(totals.subtotal.cents(), 2250);
    }

    #[test]
    fn test_totals_saturate_instead_of_overflowing() {
        let cart = Cart::from_items(vec![
            item("1", i64::MAX / 2, 3),
            item("2", 1, i64::MAX),
            item("3", 1, 1),
        ]);
        let totals = cart.totals();

        assert_eq!(totals.total_quantity, i64::MAX);
        assert_eq!(totals.subtotal.cents(), i64::MAX);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let cart = Cart::from_items(vec![item("1", 1000, 1)]);
        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
    }
}
