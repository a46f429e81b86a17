//! Command-line argument parsing and validation

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cmdplus - run typed one-line commands against the built-in command set
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "cmdplus")]
pub struct Args {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Dispatch a single command line, given as words joined by spaces
    Run {
        /// Command name followed by its arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },

    /// Dispatch every line of a script file
    Script {
        /// File with one command per line
        path: PathBuf,

        /// Continue with the next line after a failure
        #[arg(long)]
        keep_going: bool,

        /// Lines starting with this prefix are skipped
        #[arg(long, default_value = "#")]
        comment_prefix: String,
    },

    /// List the available commands and their signatures
    List,
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    Args::parse()
}
