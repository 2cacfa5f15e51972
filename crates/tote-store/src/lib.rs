//! # tote-store: Local Key-Value Store for Tote
//!
//! String key-value persistence the cart manager writes its snapshot into.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tote Persistence Flow                            │
//! │                                                                         │
//! │  CartManager (tote-cart)                                               │
//! │       │  store.set("products", "{…}")                                  │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   tote-store (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌────────────────┐   ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │ KeyValueStore  │   │  SqliteStore   │   │ MemoryStore  │   │   │
//! │  │   │   (trait)      │◄──│  (sqlite.rs)   │   │ (memory.rs)  │   │   │
//! │  │   │                │◄──┼────────────────┼───│  tests       │   │   │
//! │  │   └────────────────┘   └───────┬────────┘   └──────────────┘   │   │
//! │  │                                │ migrations.rs                  │   │
//! │  └────────────────────────────────┼────────────────────────────────┘   │
//! │                                   ▼                                     │
//! │                        SQLite file: kv_store table                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tote_store::{KeyValueStore, SqliteStore, StoreConfig};
//!
//! let store = SqliteStore::new(StoreConfig::new("tote.db")).await?;
//! store.set("products", "[]").await?;
//! assert_eq!(store.get("products").await?.as_deref(), Some("[]"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod migrations;
pub mod sqlite;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, StoreConfig};
pub use store::KeyValueStore;
