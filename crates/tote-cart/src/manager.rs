//! # Cart Manager
//!
//! A single tokio task owns the cart. Handles send it commands; it runs each
//! one to completion before taking the next.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CartManager Flow                                 │
//! │                                                                         │
//! │  CartHandle ─┐                                                         │
//! │  CartHandle ─┼──► mpsc<Command> ──► CartManager::run                   │
//! │  CartHandle ─┘         ▲                 │                             │
//! │                        │                 ▼                             │
//! │               oneshot reply     ┌───────────────────────────────┐      │
//! │                                 │ add_to_cart(item)             │      │
//! │                                 │   validate                    │      │
//! │                                 │   POST /products              │      │
//! │                                 │   store.set(key, cart+item)   │      │
//! │                                 │   cart.push(item)             │      │
//! │                                 │                               │      │
//! │                                 │ increment(id) / decrement(id) │      │
//! │                                 │   GET /products/{id}          │      │
//! │                                 │   quantity ± 1                │      │
//! │                                 │   PUT or DELETE               │      │
//! │                                 │   store.set(key, next cart)   │      │
//! │                                 │   cart = next                 │      │
//! │                                 └───────────────────────────────┘      │
//! │                                                                         │
//! │  A failure at any step returns the error and leaves `cart` as it was. │
//! │  Remote changes already made are not undone.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{mpsc, oneshot};
use tote_core::validation::validate_item;
use tote_core::{Cart, CartItem, CartTotals, CoreError};
use tote_remote::ProductApi;
use tote_store::KeyValueStore;
use tracing::{debug, error, info, warn};

use crate::config::CartConfig;
use crate::error::{CartError, CartResult};
use crate::persistence;

// =============================================================================
// Results
// =============================================================================

/// Outcome of a decrement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Decremented {
    /// Quantity is still positive; carries the record as written back.
    Updated(CartItem),

    /// Quantity reached zero; the record and every matching line are gone.
    Removed,
}

// =============================================================================
// Commands
// =============================================================================

type Reply<T> = oneshot::Sender<T>;

#[derive(Debug)]
enum Command {
    Snapshot { reply: Reply<Vec<CartItem>> },
    Totals { reply: Reply<CartTotals> },
    Add { item: CartItem, reply: Reply<CartResult<()>> },
    Increment { id: String, reply: Reply<CartResult<CartItem>> },
    Decrement { id: String, reply: Reply<CartResult<Decremented>> },
    Shutdown { reply: Reply<()> },
}

// =============================================================================
// Cart Handle
// =============================================================================

/// The cart's capability bundle. Cheap to clone; every clone talks to the
/// same manager.
#[derive(Debug, Clone)]
pub struct CartHandle {
    cmd_tx: mpsc::Sender<Command>,
}

impl CartHandle {
    /// Current lines, in display order.
    pub async fn snapshot(&self) -> CartResult<Vec<CartItem>> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Summary figures for the current lines.
    pub async fn totals(&self) -> CartResult<CartTotals> {
        self.request(|reply| Command::Totals { reply }).await
    }

    /// Creates the product remotely, persists, then appends it.
    ///
    /// Adding an identifier already in the cart creates a second line.
    pub async fn add_to_cart(&self, item: CartItem) -> CartResult<()> {
        self.request(|reply| Command::Add { item, reply }).await?
    }

    /// Raises the product's quantity by one and returns the updated record.
    ///
    /// Fails with `ProductNotFound` when the API has no such record.
    pub async fn increment(&self, id: &str) -> CartResult<CartItem> {
        let id = id.to_string();
        self.request(|reply| Command::Increment { id, reply }).await?
    }

    /// Lowers the product's quantity by one, removing it at zero.
    ///
    /// Fails with `ProductNotFound` when the API has no such record.
    pub async fn decrement(&self, id: &str) -> CartResult<Decremented> {
        let id = id.to_string();
        self.request(|reply| Command::Decrement { id, reply }).await?
    }

    /// Stops the manager. Every later call, on any clone, fails with `NotRunning`.
    pub async fn shutdown(&self) -> CartResult<()> {
        self.request(|reply| Command::Shutdown { reply }).await
    }

    /// Returns true while the manager accepts commands.
    pub fn is_running(&self) -> bool {
        !self.cmd_tx.is_closed()
    }

    async fn request<T>(&self, command: impl FnOnce(Reply<T>) -> Command) -> CartResult<T> {
        let (reply, response) = oneshot::channel();
        self.cmd_tx
            .send(command(reply))
            .await
            .map_err(|_| CartError::NotRunning)?;
        response.await.map_err(|_| CartError::NotRunning)
    }
}

// =============================================================================
// Cart Manager
// =============================================================================

/// Owns the cart and its collaborators.
pub struct CartManager {
    cart: Cart,
    api: Arc<dyn ProductApi>,
    store: Arc<dyn KeyValueStore>,
    storage_key: String,
    cmd_rx: mpsc::Receiver<Command>,
}

impl CartManager {
    /// Restores the persisted cart, spawns the manager task, and returns its handle.
    ///
    /// Restore runs exactly once, here. A storage failure or an undecodable
    /// stored value is returned instead of starting with an empty cart.
    pub async fn spawn(
        api: Arc<dyn ProductApi>,
        store: Arc<dyn KeyValueStore>,
        config: &CartConfig,
    ) -> CartResult<CartHandle> {
        let storage_key = config.storage_key().to_string();
        let restored = Self::restore(store.as_ref(), &storage_key).await?;

        let mut cart = Cart::new();
        cart.extend(restored);

        info!(
            key = %storage_key,
            lines = cart.len(),
            "Cart manager starting"
        );

        let (cmd_tx, cmd_rx) = mpsc::channel(config.cart.channel_capacity);

        let manager = CartManager {
            cart,
            api,
            store,
            storage_key,
            cmd_rx,
        };

        tokio::spawn(manager.run());

        Ok(CartHandle { cmd_tx })
    }

    async fn restore(store: &dyn KeyValueStore, key: &str) -> CartResult<Vec<CartItem>> {
        let mut pairs = store.multi_get(&[key]).await?;

        match pairs.pop().and_then(|(_, value)| value) {
            Some(raw) => {
                let items = persistence::decode(&raw)?;
                debug!(key = %key, lines = items.len(), "Restored cart");
                Ok(items)
            }
            None => {
                debug!(key = %key, "No stored cart");
                Ok(Vec::new())
            }
        }
    }

    /// Main loop. Returns once a shutdown arrives or every handle is dropped.
    async fn run(mut self) {
        while let Some(command) = self.cmd_rx.recv().await {
            match command {
                Command::Snapshot { reply } => {
                    let _ = reply.send(self.cart.snapshot());
                }
                Command::Totals { reply } => {
                    let _ = reply.send(self.cart.totals());
                }
                Command::Add { item, reply } => {
                    let _ = reply.send(self.add_to_cart(item).await);
                }
                Command::Increment { id, reply } => {
                    let _ = reply.send(self.increment(&id).await);
                }
                Command::Decrement { id, reply } => {
                    let _ = reply.send(self.decrement(&id).await);
                }
                Command::Shutdown { reply } => {
                    info!("Cart manager shutting down");
                    self.cmd_rx.close();
                    let _ = reply.send(());
                    break;
                }
            }
        }

        info!(lines = self.cart.len(), "Cart manager stopped");
    }

    // =========================================================================
    // Operations
    // =========================================================================

    async fn add_to_cart(&mut self, item: CartItem) -> CartResult<()> {
        validate_item(&item)?;

        self.api.create(&item).await.map_err(|e| {
            error!(id = %item.id, error = %e, "Failed to create product");
            e
        })?;

        let mut next = self.cart.clone();
        next.push(item);
        self.commit(next).await?;

        debug!(lines = self.cart.len(), "Added item to cart");
        Ok(())
    }

    async fn increment(&mut self, id: &str) -> CartResult<CartItem> {
        let updated = self.fetch(id).await?.incremented();
        self.api.update(id, &updated).await?;

        let mut next = self.cart.clone();
        if next.replace(id, &updated) == 0 {
            debug!(id = %id, "Incremented product has no local line");
            return Ok(updated);
        }
        self.commit(next).await?;

        debug!(id = %id, quantity = updated.quantity, "Incremented");
        Ok(updated)
    }

    async fn decrement(&mut self, id: &str) -> CartResult<Decremented> {
        let updated = self.fetch(id).await?.decremented();

        if updated.quantity > 0 {
            self.api.update(id, &updated).await?;

            let mut next = self.cart.clone();
            if next.replace(id, &updated) > 0 {
                self.commit(next).await?;
            }

            debug!(id = %id, quantity = updated.quantity, "Decremented");
            return Ok(Decremented::Updated(updated));
        }

        if updated.quantity < 0 {
            warn!(id = %id, quantity = updated.quantity, "Remote quantity was already below one");
        }

        self.api.delete(id).await?;

        let mut next = self.cart.clone();
        if next.remove(id) > 0 {
            self.commit(next).await?;
        }

        debug!(id = %id, "Removed from cart");
        Ok(Decremented::Removed)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn fetch(&self, id: &str) -> CartResult<CartItem> {
        let lookup = self.api.get(id).await?;
        if !lookup.is_found() {
            warn!(id = %id, "Product not found");
        }

        lookup
            .into_option()
            .ok_or_else(|| CoreError::ProductNotFound(id.to_string()).into())
    }

    /// Persists `next`, then makes it the current cart.
    async fn commit(&mut self, next: Cart) -> CartResult<()> {
        let raw = persistence::encode(&next)?;
        self.store.set(&self.storage_key, &raw).await.map_err(|e| {
            error!(key = %self.storage_key, error = %e, "Failed to persist cart");
            e
        })?;

        self.cart = next;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
