//! # tote
//!
//! Command-line front end for the cart.
//!
//! ## Output
//! - stdout: the command's JSON result, or `{code, message}` on failure
//! - stderr: logs
//! - exit status: 0 on success, 1 on failure

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use tote_cli::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match tote_cli::run(cli).await {
        Ok(output) => print_json(&output),
        Err(err) => {
            print_json(&err);
            process::exit(1);
        }
    }
}

/// Initializes the tracing subscriber on stderr.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=tote_cart=trace` - Trace the cart manager only
/// - Default: warnings, plus INFO from the cart and CLI crates
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "debug,sqlx=warn,hyper=info,reqwest=info"
    } else {
        "warn,tote_cli=info,tote_cart=info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("failed to encode output: {}", e);
            process::exit(1);
        }
    }
}
