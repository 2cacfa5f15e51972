//! In-memory product API, used by tests and `--ephemeral` runs.
//!
//! Behaves like a small REST backend: `update` and `delete` on a missing
//! record answer 404. Two switches simulate failures:
//!
//! - `set_offline(true)` makes every call fail with `ConnectionFailed`
//! - `set_read_only(true)` makes writes fail with HTTP 503

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tote_core::{CartItem, Lookup};

use crate::api::ProductApi;
use crate::error::{RemoteError, RemoteResult};

/// Product records in a `HashMap`, with a log of every call received.
#[derive(Debug, Default)]
pub struct MemoryProductApi {
    records: RwLock<HashMap<String, CartItem>>,
    calls: Mutex<Vec<String>>,
    offline: AtomicBool,
    read_only: AtomicBool,
}

impl MemoryProductApi {
    /// Creates an empty API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an API that already holds the given records.
    pub fn with_items(items: impl IntoIterator<Item = CartItem>) -> Self {
        MemoryProductApi {
            records: RwLock::new(
                items
                    .into_iter()
                    .map(|item| (item.id.clone(), item))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    /// Fails every subsequent call with `ConnectionFailed` while set.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Fails every subsequent write with HTTP 503 while set.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Returns the stored record for `id`, if any.
    pub async fn record(&self, id: &str) -> Option<CartItem> {
        self.records.read().await.get(id).cloned()
    }

    /// Number of stored records.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Returns true if no records are stored.
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Calls received so far, oldest first, as `"METHOD /products[/id]"`.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    async fn enter(&self, method: &str, id: Option<&str>, write: bool) -> RemoteResult<()> {
        let path = match id {
            Some(id) => format!("/products/{}", id),
            None => "/products".to_string(),
        };
        self.calls.lock().await.push(format!("{} {}", method, path));

        if self.offline.load(Ordering::SeqCst) {
            return Err(RemoteError::ConnectionFailed(
                "product API is offline".to_string(),
            ));
        }

        if write && self.read_only.load(Ordering::SeqCst) {
            return Err(Self::status(method, &path, 503));
        }

        Ok(())
    }

    fn status(method: &str, path: &str, status: u16) -> RemoteError {
        RemoteError::Status {
            method: method.to_string(),
            url: format!("memory:{}", path),
            status,
        }
    }
}

#[async_trait]
impl ProductApi for MemoryProductApi {
    async fn get(&self, id: &str) -> RemoteResult<Lookup> {
        self.enter("GET", Some(id), false).await?;
        Ok(self.records.read().await.get(id).cloned().into())
    }

    async fn create(&self, item: &CartItem) -> RemoteResult<()> {
        self.enter("POST", None, true).await?;
        self.records
            .write()
            .await
            .insert(item.id.clone(), item.clone());
        Ok(())
    }

    async fn update(&self, id: &str, item: &CartItem) -> RemoteResult<()> {
        self.enter("PUT", Some(id), true).await?;

        let mut records = self.records.write().await;
        match records.get_mut(id) {
            Some(record) => {
                *record = item.clone();
                Ok(())
            }
            None => Err(Self::status("PUT", &format!("/products/{}", id), 404)),
        }
    }

    async fn delete(&self, id: &str) -> RemoteResult<()> {
        self.enter("DELETE", Some(id), true).await?;

        match self.records.write().await.remove(id) {
            Some(_) => Ok(()),
            None => Err(Self::status("DELETE", &format!("/products/{}", id), 404)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tote_core::Money;

    fn item(id: &str, quantity: i64) -> CartItem {
        CartItem::new(id, "Shirt", "shirt.png", Money::from_cents(1000), quantity)
    }

    #[tokio::test]
    async fn test_crud() {
        let api = MemoryProductApi::new();
        assert_eq!(api.get("1").await.unwrap(), Lookup::NotFound);

        api.create(&item("1", 1)).await.unwrap();
        assert_eq!(api.get("1").await.unwrap(), Lookup::Found(item("1", 1)));

        api.update("1", &item("1", 3)).await.unwrap();
        assert_eq!(api.record("1").await.unwrap().quantity, 3);

        api.delete("1").await.unwrap();
        assert!(api.is_empty().await);

        assert_eq!(
            api.calls().await,
            vec![
                "GET /products/1",
                "POST /products",
                "GET /products/1",
                "PUT /products/1",
                "DELETE /products/1",
            ]
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_are_404() {
        let api = MemoryProductApi::with_items([item("1", 1)]);

        let err = api.update("2", &item("2", 1)).await.unwrap_err();
        assert!(matches!(err, RemoteError::Status { status: 404, .. }));

        let err = api.delete("2").await.unwrap_err();
        assert!(matches!(err, RemoteError::Status { status: 404, .. }));
        assert_eq!(api.len().await, 1);
    }

    #[tokio::test]
    async fn test_offline() {
        let api = MemoryProductApi::with_items([item("1", 1)]);
        api.set_offline(true);

        assert!(matches!(
            api.get("1").await.unwrap_err(),
            RemoteError::ConnectionFailed(_)
        ));

        api.set_offline(false);
        assert!(api.get("1").await.unwrap().is_found());
    }

    #[tokio::test]
    async fn test_read_only_rejects_writes_only() {
        let api = MemoryProductApi::with_items([item("1", 1)]);
        api.set_read_only(true);

        assert!(api.get("1").await.unwrap().is_found());

        let err = api.update("1", &item("1", 2)).await.unwrap_err();
        assert!(matches!(err, RemoteError::Status { status: 503, .. }));
        assert_eq!(api.record("1").await.unwrap().quantity, 1);
    }
}
