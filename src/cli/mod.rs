//! Command-line interface module
//!
//! Provides argument parsing, the built-in command set and command execution.

pub mod args;
pub mod builtins;
pub mod commands;

pub use args::{Args, Command, parse_args};
pub use builtins::builtin_dispatcher;
pub use commands::execute_command;
