//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "tote", about = "Shopping cart backed by a product API", version, long_about = None)]
pub struct Cli {
    /// Path to tote.toml; defaults to the platform config directory
    #[arg(long, global = true, env = "TOTE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Product API root, overriding the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// SQLite database file, overriding the config file
    #[arg(long, global = true)]
    pub storage_path: Option<PathBuf>,

    /// Use an in-memory product API and store; nothing survives the run
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the cart lines
    List,

    /// Add a product to the cart
    Add(AddArgs),

    /// Raise a product's quantity by one
    Increment(IdArgs),

    /// Lower a product's quantity by one, removing it at zero
    Decrement(IdArgs),

    /// Print line count, total quantity and subtotal
    Totals,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Product identifier; generated when omitted
    #[arg(long)]
    pub id: Option<String>,

    /// Display title
    #[arg(long)]
    pub title: String,

    /// Image reference
    #[arg(long, default_value = "")]
    pub image_url: String,

    /// Unit price in major units, e.g. 10.5
    #[arg(long, allow_negative_numbers = true)]
    pub price: f64,

    /// Quantity to add
    #[arg(long, default_value_t = 1, allow_negative_numbers = true)]
    pub quantity: i64,
}

#[derive(Debug, Args)]
pub struct IdArgs {
    /// Product identifier
    pub id: String,
}
