//! # KeyValueStore Trait
//!
//! The seam between the cart manager and local persistence.
//!
//! ```text
//!  CartManager ──► Arc<dyn KeyValueStore>
//!                        │
//!          ┌─────────────┴─────────────┐
//!          ▼                           ▼
//!     SqliteStore                 MemoryStore
//!     (production)                (tests)
//! ```

use async_trait::async_trait;

use crate::error::StoreResult;

/// A string key-value store.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a value. `Ok(None)` when the key has never been set.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Deletes a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> StoreResult<()>;

    /// Reads several keys, returning `(key, value)` pairs in request order.
    async fn multi_get(&self, keys: &[&str]) -> StoreResult<Vec<(String, Option<String>)>> {
        let mut pairs = Vec::with_capacity(keys.len());
        for key in keys {
            pairs.push((key.to_string(), self.get(key).await?));
        }
        Ok(pairs)
    }
}
