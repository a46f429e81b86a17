//! Error types for the command interpreter
//!
//! Every failure carries enough context to report where and why a line was
//! rejected. Tokenizer errors record the cursor offset (in bytes) at which the
//! expectation failed.

use thiserror::Error;

/// Main error type for tokenizing, registering and dispatching commands
#[derive(Error, Debug)]
pub enum CommandError {
    /// The input line was empty or contained only whitespace
    #[error("Expected command name on position 0 but found nothing")]
    EmptyCommand,

    /// No command is registered under the given name
    #[error("Unknown command {name}")]
    UnknownCommand { name: String },

    /// The command exists but the line carries a different number of arguments
    #[error("Unknown command {name} with {count} parameters (expected {expected})")]
    ArityMismatch {
        name: String,
        count: usize,
        expected: usize,
    },

    /// A read needed more characters than the input has left
    #[error("The string has ended on position {position} and no further read can perform")]
    EndOfInput { position: usize },

    /// A typed read found no lexeme at all
    #[error("Expected {expected} on position {position} but found nothing")]
    MissingValue { position: usize, expected: String },

    /// A lexeme was found but does not parse as the expected type
    #[error("Expected {expected} on position {position} but found '{token}'")]
    WrongType {
        position: usize,
        expected: String,
        token: String,
    },

    /// A backslash inside a quoted string was followed by something other than `"` or `\`
    #[error("Invalid escape '\\{found}' on position {position}")]
    InvalidEscape { position: usize, found: char },

    /// A quoted string ran to the end of input without a closing quote
    #[error("Expected end of quote on position {position} but found end of input")]
    UnterminatedQuote { position: usize },

    /// A specific character was required at the cursor
    #[error("Expected {expected} on position {position} but found {}", describe_char(.found))]
    UnexpectedChar {
        position: usize,
        expected: String,
        found: Option<char>,
    },

    /// A typed argument failed to read while dispatching a command
    #[error("Failed to read argument {index} of command {command}")]
    Argument {
        command: String,
        index: usize,
        #[source]
        source: Box<CommandError>,
    },

    /// The command name is empty or whitespace-only
    #[error("Invalid command name '{name}': the name is empty")]
    InvalidName { name: String },

    /// A command with the same (case-insensitive) name is already registered
    #[error("Command {name} is already registered")]
    DuplicateCommand { name: String },

    /// A command was built without a handler
    #[error("Command has no handler")]
    MissingHandler,

    /// A handler asked for an argument of a different kind than the one decoded
    #[error("Argument {index} was requested as {expected} but is {}", describe_kind(.found))]
    ArgumentAccess {
        index: usize,
        expected: String,
        found: Option<String>,
    },

    /// A manual cursor move pointed outside the text or into a character
    #[error("Position {position} is not a valid cursor position for text of length {length}")]
    InvalidPosition { position: usize, length: usize },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

fn describe_char(found: &Option<char>) -> String {
    found.map_or_else(|| "end of input".to_string(), |c| format!("'{c}'"))
}

fn describe_kind(found: &Option<String>) -> &str {
    found.as_deref().unwrap_or("missing")
}

impl CommandError {
    /// Create a new missing value error
    pub fn missing_value(position: usize, expected: impl Into<String>) -> Self {
        Self::MissingValue {
            position,
            expected: expected.into(),
        }
    }

    /// Create a new wrong type error
    pub fn wrong_type(
        position: usize,
        expected: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self::WrongType {
            position,
            expected: expected.into(),
            token: token.into(),
        }
    }

    /// Create a new unexpected character error
    pub fn unexpected_char(position: usize, expected: impl Into<String>, found: Option<char>) -> Self {
        Self::UnexpectedChar {
            position,
            expected: expected.into(),
            found,
        }
    }

    /// Wrap a read failure with the command and argument index it happened on
    pub fn argument(command: impl Into<String>, index: usize, source: CommandError) -> Self {
        Self::Argument {
            command: command.into(),
            index,
            source: Box::new(source),
        }
    }

    /// Create a new argument access error
    pub fn argument_access(
        index: usize,
        expected: impl Into<String>,
        found: Option<String>,
    ) -> Self {
        Self::ArgumentAccess {
            index,
            expected: expected.into(),
            found,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Cursor offset at which a positional error occurred
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::EndOfInput { position }
            | Self::MissingValue { position, .. }
            | Self::WrongType { position, .. }
            | Self::InvalidEscape { position, .. }
            | Self::UnterminatedQuote { position }
            | Self::UnexpectedChar { position, .. } => Some(*position),
            Self::EmptyCommand => Some(0),
            Self::Argument { source, .. } => source.position(),
            _ => None,
        }
    }

    /// Whether the reader rewound its cursor to the start of the failed token
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::MissingValue { .. } | Self::WrongType { .. } | Self::UnexpectedChar { .. } => true,
            Self::Argument { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CommandError>;
