//! # tote-cart: Cart Manager for Tote
//!
//! Owns the cart's line items and keeps them consistent with the product API
//! and the local key-value store.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Manager Architecture                        │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                  CartManager (tokio task)                        │  │
//! │  │                                                                  │  │
//! │  │  Restores the stored cart once at spawn                          │  │
//! │  │  Applies one command at a time: no stale read-modify-write       │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │  ProductApi    │  │ KeyValueStore  │  │  persistence           │    │
//! │  │  (remote)      │  │ (local)        │  │  versioned envelope    │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`manager`] - `CartManager` task and its `CartHandle`
//! - [`config`] - API, storage and manager settings
//! - [`persistence`] - Stored cart encoding
//! - [`error`] - Cart error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tote_cart::{CartConfig, CartManager};
//! use tote_remote::MemoryProductApi;
//! use tote_store::MemoryStore;
//!
//! let cart = CartManager::spawn(
//!     Arc::new(MemoryProductApi::new()),
//!     Arc::new(MemoryStore::new()),
//!     &CartConfig::default(),
//! )
//! .await?;
//!
//! cart.add_to_cart(item).await?;
//! cart.increment("1").await?;
//! println!("{:?}", cart.snapshot().await?);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod manager;
pub mod persistence;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ApiSettings, CartConfig, CartSettings, StorageSettings};
pub use error::{CartError, CartResult};
pub use manager::{CartHandle, CartManager, Decremented};
pub use persistence::{Snapshot, SNAPSHOT_VERSION};
