//! In-memory key-value store, used by tests and `--ephemeral` runs.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreResult;
use crate::store::KeyValueStore;

/// A `HashMap` behind an async `RwLock`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with entries.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        MemoryStore {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("products").await.unwrap(), None);

        store.set("products", "[]").await.unwrap();
        assert_eq!(store.get("products").await.unwrap().as_deref(), Some("[]"));

        store.remove("products").await.unwrap();
        assert_eq!(store.get("products").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_multi_get_preserves_order() {
        let store = MemoryStore::with_entries([("a", "1"), ("c", "3")]);

        let pairs = store.multi_get(&["c", "b", "a"]).await.unwrap();

        assert_eq!(
            pairs,
            vec![
                ("c".to_string(), Some("3".to_string())),
                ("b".to_string(), None),
                ("a".to_string(), Some("1".to_string())),
            ]
        );
    }
}
