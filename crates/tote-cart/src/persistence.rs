//! # Cart Persistence
//!
//! Encoding of the cart under its storage key.
//!
//! ## Stored Formats
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Written                                                               │
//! │  ───────                                                               │
//! │  {"version":1,"saved_at":"2026-10-14T09:30:00Z","items":[{…},{…}]}    │
//! │                                                                         │
//! │  Accepted on restore                                                   │
//! │  ───────────────────                                                   │
//! │  envelope (above)          → items                                     │
//! │  [{…},{…}]                 → items                                     │
//! │  {"id":"1",…}              → exactly that one item (legacy)            │
//! │  null                      → empty                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The legacy form stored only the most recently added product, so a cart
//! restored from it holds a single line no matter how many were added.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tote_core::{Cart, CartItem, CoreError};

use crate::error::{CartError, CartResult};

/// Envelope version written by [`encode`].
pub const SNAPSHOT_VERSION: u32 = 1;

/// The persisted cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Envelope format version.
    pub version: u32,

    /// When the snapshot was written.
    pub saved_at: DateTime<Utc>,

    /// Cart lines in display order.
    pub items: Vec<CartItem>,
}

impl Snapshot {
    /// Captures the cart as of now.
    pub fn capture(cart: &Cart) -> Self {
        Snapshot {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            items: cart.snapshot(),
        }
    }
}

/// Every shape a stored value may take.
#[derive(Deserialize)]
#[serde(untagged)]
enum Stored {
    Envelope(Snapshot),
    List(Vec<CartItem>),
    Legacy(CartItem),
}

/// Encodes the cart as a versioned envelope.
pub fn encode(cart: &Cart) -> CartResult<String> {
    Ok(serde_json::to_string(&Snapshot::capture(cart))?)
}

/// Decodes a stored value into cart lines.
pub fn decode(raw: &str) -> CartResult<Vec<CartItem>> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "null" {
        return Ok(Vec::new());
    }

    let stored: Stored = serde_json::from_str(raw).map_err(|e| {
        CartError::from(CoreError::MalformedSnapshot(format!(
            "not a cart snapshot or product record: {}",
            e
        )))
    })?;

    match stored {
        Stored::Envelope(snapshot) if snapshot.version > SNAPSHOT_VERSION => {
            Err(CartError::Persistence(format!(
                "snapshot version {} is newer than supported version {}",
                snapshot.version, SNAPSHOT_VERSION
            )))
        }
        Stored::Envelope(snapshot) => Ok(snapshot.items),
        Stored::List(items) => Ok(items),
        Stored::Legacy(item) => Ok(vec![item]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tote_core::Money;

    fn shirt() -> CartItem {
        CartItem::new("1", "Shirt", "shirt.png", Money::from_cents(1000), 2)
    }

    fn hat() -> CartItem {
        CartItem::new("2", "Hat", "hat.png", Money::from_cents(550), 1)
    }

    #[test]
    fn test_encode_then_decode() {
        let cart = Cart::from_items(vec![shirt(), hat()]);

        let raw = encode(&cart).unwrap();
        assert!(raw.starts_with(r#"{"version":1,"saved_at":"#));

        let items = decode(&raw).unwrap();
        assert_eq!(items, vec![shirt(), hat()]);
    }

    #[test]
    fn test_decode_legacy_single_product() {
        let raw = r#"{"id":"1","title":"Shirt","image_url":"shirt.png","price":10,"quantity":2}"#;

        let items = decode(raw).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0], shirt());
    }

    #[test]
    fn test_decode_bare_list() {
        let raw = r#"[{"id":"2","title":"Hat","image_url":"hat.png","price":5.5,"quantity":1}]"#;
        assert_eq!(decode(raw).unwrap(), vec![hat()]);
    }

    #[test]
    fn test_decode_empty_values() {
        assert!(decode("").unwrap().is_empty());
        assert!(decode("null").unwrap().is_empty());
        assert!(decode(r#"{"version":1,"saved_at":"2026-10-14T09:30:00Z","items":[]}"#)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode("{not json").unwrap_err(), CartError::Persistence(_)));
        assert!(matches!(decode(r#"{"title":"no id"}"#).unwrap_err(), CartError::Persistence(_)));
        assert!(matches!(decode("42").unwrap_err(), CartError::Persistence(_)));
    }

    #[test]
    fn test_decode_rejects_future_version() {
        let raw = r#"{"version":2,"saved_at":"2026-10-14T09:30:00Z","items":[]}"#;
        assert!(matches!(decode(raw).unwrap_err(), CartError::Persistence(_)));
    }
}
