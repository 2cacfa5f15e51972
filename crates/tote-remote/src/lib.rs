//! # tote-remote: Product API Client for Tote
//!
//! The cart manager's view of the remote product API.
//!
//! ## Module Organization
//!
//! - [`api`] - The `ProductApi` trait
//! - [`http`] - reqwest implementation
//! - [`memory`] - In-memory implementation for tests and offline demos
//! - [`error`] - Remote error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tote_core::Lookup;
//! use tote_remote::{HttpProductApi, ProductApi, RemoteConfig};
//!
//! let api = HttpProductApi::new(RemoteConfig::new("http://localhost:3333")?)?;
//! match api.get("1").await? {
//!     Lookup::Found(item) => println!("{} x{}", item.title, item.quantity),
//!     Lookup::NotFound => println!("no such product"),
//! }
//! ```

pub mod api;
pub mod error;
pub mod http;
pub mod memory;

pub use api::ProductApi;
pub use error::{RemoteError, RemoteResult};
pub use http::{HttpProductApi, RemoteConfig};
pub use memory::MemoryProductApi;
