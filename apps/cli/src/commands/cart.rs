//! # Cart Commands
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  tote list                → { items, totals }                          │
//! │  tote add --title … --price …                                          │
//! │                           → { items, totals }                          │
//! │  tote increment <id>      → { item, cart: { items, totals } }          │
//! │  tote decrement <id>      → { removed, item?, cart: { … } }            │
//! │  tote totals              → { item_count, total_quantity, subtotal }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tote_cart::{CartHandle, Decremented};
use tote_core::{CartItem, CartTotals, Money};
use tracing::debug;
use uuid::Uuid;

use crate::cli::AddArgs;
use crate::error::CommandResult;

/// Cart lines with their totals.
#[derive(Debug, Clone, Serialize)]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

/// Record written back by an increment, plus the cart afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct IncrementResponse {
    pub item: CartItem,
    pub cart: CartResponse,
}

/// Outcome of a decrement, plus the cart afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct DecrementResponse {
    pub removed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<CartItem>,
    pub cart: CartResponse,
}

/// Current cart contents.
pub async fn list(cart: &CartHandle) -> CommandResult<CartResponse> {
    debug!("list command");
    current(cart).await
}

/// Adds a product built from the arguments.
///
/// ## Behavior
/// - No `--id`: a UUID v4 is generated
/// - A price that is not a finite number, has more than two decimal places,
///   or is out of range is a validation error
/// - An id already in the cart adds a second line
pub async fn add(cart: &CartHandle, args: AddArgs) -> CommandResult<CartResponse> {
    let id = args.id.unwrap_or_else(|| Uuid::new_v4().to_string());
    debug!(id = %id, quantity = args.quantity, "add command");

    let price = Money::from_major(args.price)?;
    let item = CartItem::new(id, args.title, args.image_url, price, args.quantity);

    cart.add_to_cart(item).await?;
    current(cart).await
}

/// Raises a product's quantity by one.
pub async fn increment(cart: &CartHandle, id: &str) -> CommandResult<IncrementResponse> {
    debug!(id = %id, "increment command");

    let item = cart.increment(id).await?;
    Ok(IncrementResponse {
        item,
        cart: current(cart).await?,
    })
}

/// Lowers a product's quantity by one.
pub async fn decrement(cart: &CartHandle, id: &str) -> CommandResult<DecrementResponse> {
    debug!(id = %id, "decrement command");

    let (removed, item) = match cart.decrement(id).await? {
        Decremented::Updated(item) => (false, Some(item)),
        Decremented::Removed => (true, None),
    };

    Ok(DecrementResponse {
        removed,
        item,
        cart: current(cart).await?,
    })
}

/// Summary figures.
pub async fn totals(cart: &CartHandle) -> CommandResult<CartTotals> {
    debug!("totals command");
    Ok(cart.totals().await?)
}

async fn current(cart: &CartHandle) -> CommandResult<CartResponse> {
    Ok(CartResponse {
        items: cart.snapshot().await?,
        totals: cart.totals().await?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use tote_cart::CartConfig;
    use tote_remote::MemoryProductApi;
    use tote_store::MemoryStore;

    use crate::error::ErrorCode;
    use crate::state::AppState;

    async fn state() -> AppState {
        AppState::open(&CartConfig::default(), true).await.unwrap()
    }

    fn add_args(id: Option<&str>, price: f64, quantity: i64) -> AddArgs {
        AddArgs {
            id: id.map(str::to_string),
            title: "Shirt".into(),
            image_url: "shirt.png".into(),
            price,
            quantity,
        }
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let state = state().await;

        let added = add(state.cart(), add_args(Some("1"), 10.0, 1)).await.unwrap();
        assert_eq!(added.items.len(), 1);
        assert_eq!(added.totals.subtotal.cents(), 1000);

        let listed = list(state.cart()).await.unwrap();
        assert_eq!(listed.items, added.items);
    }

    #[tokio::test]
    async fn test_add_generates_id() {
        let state = state().await;

        let added = add(state.cart(), add_args(None, 1.0, 1)).await.unwrap();

        assert!(Uuid::parse_str(&added.items[0].id).is_ok());
    }

    #[tokio::test]
    async fn test_add_rejects_bad_input() {
        let state = state().await;

        let err = add(state.cart(), add_args(Some("1"), f64::NAN, 1)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add(state.cart(), add_args(Some("1"), 1.0, -1)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add(state.cart(), add_args(Some("1"), 1e17, 2)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = add(state.cart(), add_args(Some("1"), 0.125, 1)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        assert!(list(state.cart()).await.unwrap().items.is_empty());
    }

    #[tokio::test]
    async fn test_increment_and_decrement() {
        let state = state().await;
        add(state.cart(), add_args(Some("1"), 10.0, 1)).await.unwrap();

        let inc = increment(state.cart(), "1").await.unwrap();
        assert_eq!(inc.item.quantity, 2);
        assert_eq!(inc.cart.totals.total_quantity, 2);

        let dec = decrement(state.cart(), "1").await.unwrap();
        assert!(!dec.removed);
        assert_eq!(dec.item.map(|item| item.quantity), Some(1));

        let dec = decrement(state.cart(), "1").await.unwrap();
        assert!(dec.removed);
        assert!(dec.cart.items.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let state = state().await;

        let err = increment(state.cart(), "nope").await.unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: nope");
    }

    #[tokio::test]
    async fn test_offline_api_is_remote_error() {
        let api = Arc::new(MemoryProductApi::new());
        api.set_offline(true);
        let state = AppState::with_backends(api, Arc::new(MemoryStore::new()), &CartConfig::default())
            .await
            .unwrap();

        let err = add(state.cart(), add_args(Some("1"), 1.0, 1)).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::RemoteError);
    }

    #[tokio::test]
    async fn test_decrement_json_omits_item_when_removed() {
        let state = state().await;
        add(state.cart(), add_args(Some("1"), 10.0, 1)).await.unwrap();

        let value = serde_json::to_value(decrement(state.cart(), "1").await.unwrap()).unwrap();

        assert_eq!(value["removed"], true);
        assert!(value.get("item").is_none());
        assert_eq!(value["cart"]["totals"]["item_count"], 0);
    }
}
