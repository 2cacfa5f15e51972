//! # ProductApi Trait
//!
//! The seam between the cart manager and the remote product store.

use async_trait::async_trait;
use tote_core::{CartItem, Lookup};

use crate::error::RemoteResult;

/// Remote CRUD over product records.
#[async_trait]
pub trait ProductApi: Send + Sync {
    /// `GET /products/{id}`. A missing record is `Lookup::NotFound`, not an error.
    async fn get(&self, id: &str) -> RemoteResult<Lookup>;

    /// `POST /products`.
    async fn create(&self, item: &CartItem) -> RemoteResult<()>;

    /// `PUT /products/{id}`.
    async fn update(&self, id: &str, item: &CartItem) -> RemoteResult<()>;

    /// `DELETE /products/{id}`.
    async fn delete(&self, id: &str) -> RemoteResult<()>;
}
