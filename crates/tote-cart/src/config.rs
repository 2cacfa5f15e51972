//! # Cart Configuration
//!
//! Where the product API lives, where the cart is persisted, and how the
//! manager task is sized.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TOTE_API_URL=https://shop.example.com/api                          │
//! │     TOTE_STORAGE_PATH=/var/lib/tote/tote.db                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, or                                                │
//! │     ~/.config/tote/tote.toml (Linux)                                   │
//! │     ~/Library/Application Support/com.tote.tote/tote.toml (macOS)      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:3333, key "products"                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "http://localhost:3333"
//! timeout_secs = 30
//!
//! [storage]
//! path = "/var/lib/tote/tote.db"   # omit for the platform data dir
//! key = "products"
//!
//! [cart]
//! channel_capacity = 32
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{CartError, CartResult};

/// Environment variable overriding `api.base_url`.
pub const ENV_API_URL: &str = "TOTE_API_URL";
/// Environment variable overriding `api.timeout_secs`.
pub const ENV_API_TIMEOUT_SECS: &str = "TOTE_API_TIMEOUT_SECS";
/// Environment variable overriding `storage.path`.
pub const ENV_STORAGE_PATH: &str = "TOTE_STORAGE_PATH";
/// Environment variable overriding `storage.key`.
pub const ENV_STORAGE_KEY: &str = "TOTE_STORAGE_KEY";

// =============================================================================
// API Settings
// =============================================================================

/// Product API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// API root; `/products` is appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

/// Local persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite database file. `None` uses the platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Key the cart snapshot is stored under.
    #[serde(default = "default_key")]
    pub key: String,
}

fn default_key() -> String {
    "products".to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            path: None,
            key: default_key(),
        }
    }
}

// =============================================================================
// Manager Settings
// =============================================================================

/// Manager task settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSettings {
    /// Commands buffered before a handle call waits for room.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

fn default_channel_capacity() -> usize {
    32
}

impl Default for CartSettings {
    fn default() -> Self {
        CartSettings {
            channel_capacity: default_channel_capacity(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartConfig {
    /// Product API settings.
    #[serde(default)]
    pub api: ApiSettings,

    /// Local persistence settings.
    #[serde(default)]
    pub storage: StorageSettings,

    /// Manager task settings.
    #[serde(default)]
    pub cart: CartSettings,
}

impl CartConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (tote.toml)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist. A missing file at the platform
    /// default path means defaults.
    pub fn load(config_path: Option<PathBuf>) -> CartResult<Self> {
        let mut config = Self::default();

        match config_path {
            Some(path) if !path.exists() => {
                return Err(CartError::ConfigLoadFailed(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            Some(path) => config = Self::read_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => config = Self::read_file(&path)?,
                Some(path) => debug!(?path, "Config file not found, using defaults"),
                None => debug!("No platform config directory, using defaults"),
            },
        }

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    fn read_file(path: &Path) -> CartResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parses a TOML document. Missing sections and fields take defaults.
    pub fn from_toml(contents: &str) -> CartResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CartResult<()> {
        let url = Url::parse(&self.api.base_url).map_err(|e| {
            CartError::InvalidConfig(format!("api.base_url '{}': {}", self.api.base_url, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(CartError::InvalidConfig(format!(
                "api.base_url must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(CartError::InvalidConfig(
                "api.timeout_secs must be greater than 0".into(),
            ));
        }

        if self.storage.key.trim().is_empty() {
            return Err(CartError::InvalidConfig(
                "storage.key must not be empty".into(),
            ));
        }

        if self.cart.channel_capacity == 0 {
            return Err(CartError::InvalidConfig(
                "cart.channel_capacity must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides looked up through `var` (the process environment in `load`).
    pub fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var(ENV_API_URL) {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(timeout) = var(ENV_API_TIMEOUT_SECS) {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric {}", ENV_API_TIMEOUT_SECS),
            }
        }

        if let Some(path) = var(ENV_STORAGE_PATH) {
            debug!(path = %path, "Overriding storage path from environment");
            self.storage.path = Some(PathBuf::from(path));
        }

        if let Some(key) = var(ENV_STORAGE_KEY) {
            self.storage.key = key;
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "tote", "tote")
            .map(|dirs| dirs.config_dir().join("tote.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the database path, falling back to the platform data directory.
    pub fn database_path(&self) -> CartResult<PathBuf> {
        if let Some(path) = &self.storage.path {
            return Ok(path.clone());
        }

        directories::ProjectDirs::from("com", "tote", "tote")
            .map(|dirs| dirs.data_dir().join("tote.db"))
            .ok_or_else(|| {
                CartError::InvalidConfig(
                    "No home directory found; set storage.path or TOTE_STORAGE_PATH".into(),
                )
            })
    }

    /// Returns the API request timeout.
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Returns the storage key.
    pub fn storage_key(&self) -> &str {
        &self.storage.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = CartConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:3333");
        assert_eq!(config.storage_key(), "products");
        assert_eq!(config.cart.channel_capacity, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_takes_defaults() {
        let config = CartConfig::from_toml(
            r#"
            [api]
            base_url = "https://shop.example.com/api"

            [storage]
            path = "/tmp/cart.db"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://shop.example.com/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.storage.key, "products");
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/cart.db"));
    }

    #[test]
    fn test_malformed_toml() {
        let err = CartConfig::from_toml("[api\nbase_url = 1").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_missing_explicit_config_file_fails() {
        let path = std::env::temp_dir().join(format!("tote-missing-{}.toml", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let err = CartConfig::load(Some(path)).unwrap_err();

        assert!(matches!(err, CartError::ConfigLoadFailed(ref msg) if msg.contains("not found")));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_explicit_config_file_is_read() {
        let path = std::env::temp_dir().join(format!("tote-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[cart]\nchannel_capacity = 4\n").unwrap();

        let config = CartConfig::load(Some(path.clone())).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(config.cart.channel_capacity, 4);
    }

    #[test]
    fn test_config_validation() {
        let mut config = CartConfig::default();

        config.api.base_url = "ws://localhost:3333".into();
        assert!(config.validate().is_err());

        config.api.base_url = "not a url".into();
        assert!(config.validate().is_err());

        config.api.base_url = "https://shop.example.com".into();
        config.storage.key = "  ".into();
        assert!(config.validate().is_err());

        config.storage.key = "products".into();
        config.cart.channel_capacity = 0;
        assert!(config.validate().is_err());

        config.cart.channel_capacity = 1;
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_API_URL, "https://api.example.com"),
            (ENV_API_TIMEOUT_SECS, "5"),
            (ENV_STORAGE_PATH, "/data/tote.db"),
            (ENV_STORAGE_KEY, "cart"),
        ]
        .into_iter()
        .collect();

        let mut config = CartConfig::default();
        config.apply_overrides(|name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api_timeout(), Duration::from_secs(5));
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/data/tote.db"));
        assert_eq!(config.storage_key(), "cart");
    }

    #[test]
    fn test_bad_timeout_override_is_ignored() {
        let mut config = CartConfig::default();
        config.apply_overrides(|name| (name == ENV_API_TIMEOUT_SECS).then(|| "soon".to_string()));

        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&CartConfig::default()).unwrap();
        assert!(toml_str.contains("[api]"));
        assert!(toml_str.contains("[storage]"));
        assert!(toml_str.contains("[cart]"));
    }
}
