//! Command handlers and their results

use crate::core::value::{ArgKind, Arguments};
use crate::error::{CommandError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome reported by a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandStatus {
    /// The command has been executed successfully
    Success,
    /// The command was unable to make sense of its arguments
    Unparseable,
    /// The command failed to execute
    Fail,
    /// The command has been executed successfully, but with warnings
    Warning,
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::Unparseable => "unparseable",
            Self::Fail => "fail",
            Self::Warning => "warning",
        };
        f.write_str(name)
    }
}

/// Display text plus status returned from a handler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    /// Text shown to the user
    pub text: String,
    pub status: CommandStatus,
}

impl CommandResult {
    pub fn new(text: impl Into<String>, status: CommandStatus) -> Self {
        Self {
            text: text.into(),
            status,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, CommandStatus::Success)
    }

    pub fn unparseable(text: impl Into<String>) -> Self {
        Self::new(text, CommandStatus::Unparseable)
    }

    pub fn fail(text: impl Into<String>) -> Self {
        Self::new(text, CommandStatus::Fail)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(text, CommandStatus::Warning)
    }

    /// Whether the command ran, with or without warnings
    pub fn is_success(&self) -> bool {
        matches!(self.status, CommandStatus::Success | CommandStatus::Warning)
    }
}

/// Executes a command once its arguments have been decoded
///
/// The arguments always match the signature the handler was registered with,
/// so typed accessors on [`Arguments`] only fail on a programming error.
pub trait Handler {
    fn execute(&self, arguments: &Arguments) -> CommandResult;
}

impl<F> Handler for F
where
    F: Fn(&Arguments) -> CommandResult,
{
    fn execute(&self, arguments: &Arguments) -> CommandResult {
        self(arguments)
    }
}

/// A handler bound to its argument signature
pub struct Command {
    signature: Vec<ArgKind>,
    handler: Box<dyn Handler>,
}

impl Command {
    pub fn builder() -> CommandBuilder {
        CommandBuilder::default()
    }

    /// Bind `handler` to `signature` directly
    pub fn new(signature: Vec<ArgKind>, handler: impl Handler + 'static) -> Self {
        Self {
            signature,
            handler: Box::new(handler),
        }
    }

    pub fn signature(&self) -> &[ArgKind] {
        &self.signature
    }

    /// Number of arguments a line must carry
    pub fn arity(&self) -> usize {
        self.signature.len()
    }

    pub fn execute(&self, arguments: &Arguments) -> CommandResult {
        self.handler.execute(arguments)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Command`]
#[derive(Default)]
pub struct CommandBuilder {
    signature: Vec<ArgKind>,
    handler: Option<Box<dyn Handler>>,
}

impl CommandBuilder {
    /// Append one argument to the signature
    pub fn arg(mut self, kind: ArgKind) -> Self {
        self.signature.push(kind);
        self
    }

    /// Append several arguments to the signature
    pub fn args(mut self, kinds: impl IntoIterator<Item = ArgKind>) -> Self {
        self.signature.extend(kinds);
        self
    }

    pub fn handler(mut self, handler: impl Handler + 'static) -> Self {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Finish the command; fails if no handler was supplied
    pub fn build(self) -> Result<Command> {
        let handler = self.handler.ok_or(CommandError::MissingHandler)?;
        Ok(Command {
            signature: self.signature,
            handler,
        })
    }
}
