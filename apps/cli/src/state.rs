//! # Application State
//!
//! Wires the configured collaborators into a running cart manager.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartConfig                                                             │
//! │      │                                                                  │
//! │      ├── default ────► HttpProductApi(api.base_url, api.timeout_secs)   │
//! │      │                 SqliteStore(storage.path or data dir)            │
//! │      │                                                                  │
//! │      └── --ephemeral ► MemoryProductApi + MemoryStore                   │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                 CartManager::spawn(api, store, config)                  │
//! │                              │                                          │
//! │                              ▼                                          │
//! │                         AppState { cart: CartHandle }                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tote_cart::{CartConfig, CartHandle, CartManager};
use tote_remote::{HttpProductApi, MemoryProductApi, ProductApi, RemoteConfig};
use tote_store::{KeyValueStore, MemoryStore, SqliteStore, StoreConfig};
use tracing::{debug, info};

use crate::error::CommandResult;

/// Holds the cart handle for one CLI run.
#[derive(Debug, Clone)]
pub struct AppState {
    cart: CartHandle,
}

impl AppState {
    /// Builds the configured backends and starts the cart manager.
    pub async fn open(config: &CartConfig, ephemeral: bool) -> CommandResult<Self> {
        if ephemeral {
            info!("Using in-memory product API and store");
            return Self::with_backends(
                Arc::new(MemoryProductApi::new()),
                Arc::new(MemoryStore::new()),
                config,
            )
            .await;
        }

        let remote = RemoteConfig::new(&config.api.base_url)?.timeout(config.api_timeout());
        let api = HttpProductApi::new(remote)?;
        debug!(base_url = %api.base_url(), "Product API client ready");

        let db_path = config.database_path()?;
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let store = SqliteStore::new(StoreConfig::new(db_path)).await?;

        Self::with_backends(Arc::new(api), Arc::new(store), config).await
    }

    /// Starts the cart manager over the given backends.
    pub async fn with_backends(
        api: Arc<dyn ProductApi>,
        store: Arc<dyn KeyValueStore>,
        config: &CartConfig,
    ) -> CommandResult<Self> {
        let cart = CartManager::spawn(api, store, config).await?;
        Ok(AppState { cart })
    }

    /// The cart's capability bundle.
    pub fn cart(&self) -> &CartHandle {
        &self.cart
    }
}
