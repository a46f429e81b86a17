//! Core functionality for command interpretation
//!
//! Contains the tokenizer that turns a line into typed values and the
//! dispatcher that drives it from a registered command signature.

pub mod command;
pub mod dispatcher;
pub mod tokenizer;
pub mod value;

pub use command::{Command, CommandBuilder, CommandResult, CommandStatus, Handler};
pub use dispatcher::{Dispatcher, read_value};
pub use tokenizer::{StringReader, Tokenizer, quote};
pub use value::{ArgKind, Arguments, ArgumentsBuilder, Value};
