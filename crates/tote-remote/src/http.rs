//! # HTTP Product API
//!
//! reqwest implementation of [`ProductApi`].
//!
//! ## Request Flow
//! ```text
//! CartManager::increment("1")
//!      │
//!      ▼
//! GET {base}/products/1 ──► 404 / null body ──► Lookup::NotFound
//!      │
//!      ▼ 200
//! decode CartItem ──► Lookup::Found(item)
//!      │
//!      ▼
//! PUT {base}/products/1 ──► non-2xx ──► RemoteError::Status
//! ```
//!
//! Identifiers are pushed as URL path segments, so `a/b` becomes `a%2Fb`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use tote_core::{CartItem, Lookup};
use tracing::{debug, warn};
use url::Url;

use crate::api::ProductApi;
use crate::error::{RemoteError, RemoteResult};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// =============================================================================
// Configuration
// =============================================================================

/// Connection settings for the product API.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// API root; `/products` is appended to it.
    pub base_url: Url,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl RemoteConfig {
    /// Parses the base URL. Only `http` and `https` are accepted.
    pub fn new(base_url: &str) -> RemoteResult<Self> {
        let base_url = Url::parse(base_url)?;

        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(RemoteError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                base_url
            )));
        }

        if base_url.cannot_be_a_base() {
            return Err(RemoteError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }

        Ok(RemoteConfig {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// =============================================================================
// HttpProductApi
// =============================================================================

/// Product API over HTTP/JSON.
#[derive(Debug, Clone)]
pub struct HttpProductApi {
    client: Client,
    config: RemoteConfig,
}

impl HttpProductApi {
    /// Builds the HTTP client.
    pub fn new(config: RemoteConfig) -> RemoteResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteError::Request(e.to_string()))?;

        Ok(HttpProductApi { client, config })
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    /// `{base}/products` or `{base}/products/{id}`.
    fn products_url(&self, id: Option<&str>) -> RemoteResult<Url> {
        let mut url = self.config.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                RemoteError::InvalidUrl(format!(
                    "{} cannot be used as a base URL",
                    self.config.base_url
                ))
            })?;
            segments.pop_if_empty().push("products");
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn classify(&self, err: reqwest::Error) -> RemoteError {
        if err.is_timeout() {
            RemoteError::Timeout(self.config.timeout.as_millis() as u64)
        } else if err.is_connect() {
            RemoteError::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            RemoteError::Decode(err.to_string())
        } else {
            RemoteError::Request(err.to_string())
        }
    }

    fn ensure_success(method: &str, url: &Url, response: Response) -> RemoteResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        warn!(method, url = %url, status = status.as_u16(), "Product API request failed");
        Err(RemoteError::Status {
            method: method.to_string(),
            url: url.to_string(),
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn get(&self, id: &str) -> RemoteResult<Lookup> {
        let url = self.products_url(Some(id))?;
        debug!(url = %url, "GET product");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(id = %id, "Product not found (404)");
            return Ok(Lookup::NotFound);
        }

        let response = Self::ensure_success("GET", &url, response)?;
        let body = response.text().await.map_err(|e| self.classify(e))?;

        // An empty or null body means "no such record"
        let body = body.trim();
        if body.is_empty() || body == "null" {
            debug!(id = %id, "Product not found (empty body)");
            return Ok(Lookup::NotFound);
        }

        let item: CartItem = serde_json::from_str(body)?;
        Ok(Lookup::Found(item))
    }

    async fn create(&self, item: &CartItem) -> RemoteResult<()> {
        let url = self.products_url(None)?;
        debug!(url = %url, id = %item.id, "POST product");

        let response = self
            .client
            .post(url.clone())
            .json(item)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        Self::ensure_success("POST", &url, response)?;
        Ok(())
    }

    async fn update(&self, id: &str, item: &CartItem) -> RemoteResult<()> {
        let url = self.products_url(Some(id))?;
        debug!(url = %url, quantity = item.quantity, "PUT product");

        let response = self
            .client
            .put(url.clone())
            .json(item)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        Self::ensure_success("PUT", &url, response)?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> RemoteResult<()> {
        let url = self.products_url(Some(id))?;
        debug!(url = %url, "DELETE product");

        let response = self
            .client
            .delete(url.clone())
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        Self::ensure_success("DELETE", &url, response)?;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
