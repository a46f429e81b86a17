//! # CommandPlus
//!
//! A typed single-line command interpreter. Commands are registered with a
//! signature of primitive argument kinds; a line such as `add 40 2` is split
//! into a name and a sequence of typed reads driven by that signature, and the
//! decoded values are handed to the command's handler.
//!
//! ## Features
//!
//! - Cursor-based tokenizer with positional errors and rewind on failure
//! - Quoted strings with `\"` and `\\` escapes
//! - Case-insensitive command registry with arity checking
//! - Handler results carrying a status the caller decides how to present
//!
//! ## Example
//!
//! ```
//! use commandplus::core::{ArgKind, Arguments, Command, CommandResult, Dispatcher};
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.register(
//!     "greet",
//!     Command::builder()
//!         .arg(ArgKind::String)
//!         .handler(|args: &Arguments| {
//!             CommandResult::success(format!("hello {}", args.string(0).unwrap_or("?")))
//!         })
//!         .build()?,
//! )?;
//!
//! let result = dispatcher.parse_and_run("greet world")?;
//! assert_eq!(result.text, "hello world");
//! # Ok::<(), commandplus::error::CommandError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with appropriate verbosity
pub fn setup_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
