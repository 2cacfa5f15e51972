//! # Commands Module
//!
//! One function per subcommand. Each takes the cart handle and returns a
//! serializable response.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (dispatch)
//! └── cart.rs     ◄─── list, add, increment, decrement, totals
//! ```

pub mod cart;

use serde_json::Value;

use crate::cli::Command;
use crate::error::CommandResult;
use crate::state::AppState;

/// Runs one subcommand and returns its JSON output.
pub async fn dispatch(state: &AppState, command: Command) -> CommandResult<Value> {
    let cart = state.cart();

    let output = match command {
        Command::List => serde_json::to_value(cart::list(cart).await?)?,
        Command::Add(args) => serde_json::to_value(cart::add(cart, args).await?)?,
        Command::Increment(args) => serde_json::to_value(cart::increment(cart, &args.id).await?)?,
        Command::Decrement(args) => serde_json::to_value(cart::decrement(cart, &args.id).await?)?,
        Command::Totals => serde_json::to_value(cart::totals(cart).await?)?,
    };

    Ok(output)
}
