//! # Tote CLI Library
//!
//! Everything behind the `tote` binary.
//!
//! ## Module Organization
//! ```text
//! tote_cli/
//! ├── lib.rs          ◄─── You are here (config + run)
//! ├── cli.rs          ◄─── clap argument types
//! ├── state.rs        ◄─── Backend wiring, CartHandle
//! ├── commands/
//! │   ├── mod.rs      ◄─── Dispatch
//! │   └── cart.rs     ◄─── Cart commands
//! └── error.rs        ◄─── {code, message} error type
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use serde_json::Value;
use tote_cart::CartConfig;
use tracing::{debug, info};

use cli::Cli;
use error::CommandResult;
use state::AppState;

/// Runs one invocation and returns its JSON output.
///
/// ## Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load config ──── defaults → tote.toml → TOTE_* environment          │
/// │  2. Apply flags ──── --api-url, --storage-path                          │
/// │  3. Open state ───── API client, store, CartManager::spawn (restore)    │
/// │  4. Dispatch ─────── one subcommand                                     │
/// │  5. Shut down ────── stop the manager task                              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> CommandResult<Value> {
    let config = load_config(&cli)?;
    info!(
        api = %config.api.base_url,
        key = %config.storage_key(),
        ephemeral = cli.ephemeral,
        "Starting tote"
    );

    let state = AppState::open(&config, cli.ephemeral).await?;
    let output = commands::dispatch(&state, cli.command).await;

    if state.cart().shutdown().await.is_err() {
        debug!("Cart manager already stopped");
    }

    output
}

/// Loads the configuration and applies command-line overrides.
pub fn load_config(cli: &Cli) -> CommandResult<CartConfig> {
    let mut config = CartConfig::load(cli.config.clone())?;

    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    if let Some(path) = &cli.storage_path {
        config.storage.path = Some(path.clone());
    }

    config.validate()?;
    Ok(config)
}
