//! Command dispatch
//!
//! The [`Dispatcher`] maps lower-cased command names to [`Command`]s. Each call
//! to [`Dispatcher::parse_and_run`] reads the name off the line, checks the
//! argument count, decodes one value per signature entry and invokes the
//! handler. Registration takes `&mut self` and dispatch `&self`, so the
//! registry cannot change while a line is being dispatched.

use crate::core::command::{Command, CommandResult};
use crate::core::tokenizer::{StringReader, Tokenizer};
use crate::core::value::{ArgKind, ArgumentsBuilder, Value};
use crate::error::{CommandError, Result};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Registry of commands plus the parse-and-invoke cycle
#[derive(Debug, Default)]
pub struct Dispatcher {
    commands: HashMap<String, Command>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `command` under `name` (case-insensitive)
    #[instrument(skip(self, command), fields(arity = command.arity()))]
    pub fn register(&mut self, name: &str, command: Command) -> Result<()> {
        if name.trim().is_empty() {
            return Err(CommandError::InvalidName {
                name: name.to_string(),
            });
        }

        let key = name.to_lowercase();
        if self.commands.contains_key(&key) {
            return Err(CommandError::DuplicateCommand { name: key });
        }

        debug!("Registered command {} with signature {:?}", key, command.signature());
        self.commands.insert(key, command);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(&name.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Signature of the command registered under `name`
    pub fn signature(&self, name: &str) -> Option<&[ArgKind]> {
        self.commands
            .get(&name.to_lowercase())
            .map(Command::signature)
    }

    /// Parse `line` against the registered commands and run the matching handler
    ///
    /// The handler's result is returned as-is; its status is not interpreted.
    #[instrument(skip(self))]
    pub fn parse_and_run(&self, line: &str) -> Result<CommandResult> {
        if line.trim().is_empty() {
            return Err(CommandError::EmptyCommand);
        }

        let mut reader = Tokenizer::new(line);
        let name = reader.read_unquoted_string();
        let command = self
            .commands
            .get(&name.to_lowercase())
            .ok_or_else(|| CommandError::UnknownCommand { name: name.clone() })?;

        let count = count_arguments(line, &name);
        if count != command.arity() {
            return Err(CommandError::ArityMismatch {
                name,
                count,
                expected: command.arity(),
            });
        }

        let mut arguments = ArgumentsBuilder::with_capacity(command.arity());
        for (index, kind) in command.signature().iter().enumerate() {
            reader.skip_whitespace();
            let value = read_value(&mut reader, *kind)
                .map_err(|e| CommandError::argument(name.as_str(), index, e))?;
            arguments.push(value);
        }
        let arguments = arguments.finish();

        debug!("Running {} with {:?}", name, arguments.as_slice());
        Ok(command.execute(&arguments))
    }
}

/// Read one value of the given kind from the reader
pub fn read_value<R: StringReader + ?Sized>(reader: &mut R, kind: ArgKind) -> Result<Value> {
    let value = match kind {
        ArgKind::String => Value::String(reader.read_string()?),
        ArgKind::Boolean => Value::Boolean(reader.read_boolean()?),
        ArgKind::Int32 => Value::Int32(reader.read_int32()?),
        ArgKind::Int64 => Value::Int64(reader.read_int64()?),
        ArgKind::Single => Value::Single(reader.read_single()?),
        ArgKind::Double => Value::Double(reader.read_double()?),
    };
    Ok(value)
}

/// Argument count as seen by a plain split on single spaces with one
/// occurrence of the name removed. Quoted arguments containing spaces count
/// once per space-separated piece, and repeated spaces yield empty pieces.
fn count_arguments(line: &str, name: &str) -> usize {
    let mut pieces: Vec<&str> = line.split(' ').collect();
    if let Some(index) = pieces.iter().position(|piece| *piece == name) {
        pieces.remove(index);
    }
    pieces.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::value::Arguments;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Registers `kinds` under "test" and records every argument list it receives
    fn recording_dispatcher(kinds: &[ArgKind]) -> (Dispatcher, Rc<RefCell<Vec<Arguments>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let command = Command::builder()
            .args(kinds.iter().copied())
            .handler(move |args: &Arguments| {
                sink.borrow_mut().push(args.clone());
                CommandResult::success("Success")
            })
            .build()
            .unwrap();

        let mut dispatcher = Dispatcher::new();
        dispatcher.register("test", command).unwrap();
        (dispatcher, calls)
    }

    #[test]
    fn test_single_boolean_command() {
        let (dispatcher, calls) = recording_dispatcher(&[ArgKind::Boolean]);
        let result = dispatcher.parse_and_run("test true").unwrap();

        assert_eq!(result, CommandResult::success("Success"));
        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].as_slice(), &[Value::Boolean(true)]);
    }

    #[test]
    fn test_complex_command() {
        let (dispatcher, calls) =
            recording_dispatcher(&[ArgKind::String, ArgKind::Boolean, ArgKind::Int32]);
        dispatcher.parse_and_run("test yeah false 20").unwrap();

        let calls = calls.borrow();
        let args = &calls[0];
        assert_eq!(args.string(0).unwrap(), "yeah");
        assert!(!args.boolean(1).unwrap());
        assert_eq!(args.int32(2).unwrap(), 20);
    }

    #[test]
    fn test_parameterless_command() {
        let (dispatcher, calls) = recording_dispatcher(&[]);
        dispatcher.parse_and_run("test").unwrap();
        assert_eq!(calls.borrow().len(), 1);
        assert!(calls.borrow()[0].is_empty());
    }

    #[test]
    fn test_all_kinds() {
        let (dispatcher, calls) = recording_dispatcher(&[
            ArgKind::Int64,
            ArgKind::Single,
            ArgKind::Double,
            ArgKind::String,
        ]);
        dispatcher.parse_and_run("test -9000000000 0.5 2.25 x_y").unwrap();
        assert_eq!(
            calls.borrow()[0].as_slice(),
            &[
                Value::Int64(-9_000_000_000),
                Value::Single(0.5),
                Value::Double(2.25),
                Value::String("x_y".to_string()),
            ]
        );
    }

    #[test]
    fn test_name_is_case_insensitive() {
        let (dispatcher, calls) = recording_dispatcher(&[ArgKind::Int32]);
        dispatcher.parse_and_run("TeSt 5").unwrap();
        assert_eq!(calls.borrow()[0].int32(0).unwrap(), 5);
        assert!(dispatcher.contains("TEST"));
    }

    #[test]
    fn test_empty_line() {
        let (dispatcher, calls) = recording_dispatcher(&[]);
        for line in ["", "   ", "\t"] {
            let err = dispatcher.parse_and_run(line).unwrap_err();
            assert!(matches!(err, CommandError::EmptyCommand));
        }
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_unknown_command() {
        let (dispatcher, calls) = recording_dispatcher(&[ArgKind::Int32]);
        let err = dispatcher.parse_and_run("other \"never read").unwrap_err();
        match err {
            CommandError::UnknownCommand { name } => assert_eq!(name, "other"),
            other => panic!("Expected UnknownCommand, got {other:?}"),
        }
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_arity_mismatch_before_reading() {
        let (dispatcher, calls) = recording_dispatcher(&[ArgKind::Int32]);
        // "x" and "y" are not numbers, but the count check fails first
        let err = dispatcher.parse_and_run("test x y").unwrap_err();
        match err {
            CommandError::ArityMismatch {
                name,
                count,
                expected,
            } => {
                assert_eq!(name, "test");
                assert_eq!(count, 2);
                assert_eq!(expected, 1);
            }
            other => panic!("Expected ArityMismatch, got {other:?}"),
        }
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_quoted_argument_with_space_counts_twice() {
        let (dispatcher, calls) = recording_dispatcher(&[ArgKind::String]);
        let err = dispatcher.parse_and_run("test \"a b\"").unwrap_err();
        assert!(matches!(err, CommandError::ArityMismatch { count: 2, .. }));

        // A quoted argument without spaces goes through
        dispatcher.parse_and_run(r#"test "a\"b""#).unwrap();
        assert_eq!(calls.borrow()[0].string(0).unwrap(), "a\"b");
    }

    #[test]
    fn test_double_space_counts_empty_piece() {
        let (dispatcher, _) = recording_dispatcher(&[ArgKind::Int32]);
        let err = dispatcher.parse_and_run("test  1").unwrap_err();
        assert!(matches!(err, CommandError::ArityMismatch { count: 2, .. }));
    }

    #[test]
    fn test_read_failure_carries_position() {
        let (dispatcher, calls) = recording_dispatcher(&[ArgKind::Boolean, ArgKind::Int32]);
        let err = dispatcher.parse_and_run("test true 1.5").unwrap_err();
        match &err {
            CommandError::Argument {
                command,
                index,
                source,
            } => {
                assert_eq!(command, "test");
                assert_eq!(*index, 1);
                assert!(matches!(**source, CommandError::WrongType { position: 10, .. }));
            }
            other => panic!("Expected Argument, got {other:?}"),
        }
        assert_eq!(err.position(), Some(10));
        assert!(calls.borrow().is_empty());

        // The dispatcher stays usable after a failure
        dispatcher.parse_and_run("test false 2").unwrap();
        assert_eq!(calls.borrow().len(), 1);
    }

    #[test]
    fn test_handler_status_is_passed_through() {
        let mut dispatcher = Dispatcher::new();
        let command = Command::new(vec![ArgKind::String], |args: &Arguments| {
            CommandResult::fail(format!("cannot {}", args.string(0).unwrap_or_default()))
        });
        dispatcher.register("do", command).unwrap();

        let result = dispatcher.parse_and_run("do it").unwrap();
        assert_eq!(result, CommandResult::fail("cannot it"));
    }

    #[test]
    fn test_register_rejects_bad_names_and_duplicates() {
        let handler = |_: &Arguments| CommandResult::success("");
        let mut dispatcher = Dispatcher::new();

        for name in ["", "  "] {
            let err = dispatcher
                .register(name, Command::new(vec![], handler))
                .unwrap_err();
            assert!(matches!(err, CommandError::InvalidName { .. }));
        }

        dispatcher.register("Echo", Command::new(vec![], handler)).unwrap();
        let err = dispatcher
            .register("ECHO", Command::new(vec![], handler))
            .unwrap_err();
        assert!(matches!(err, CommandError::DuplicateCommand { ref name } if name == "echo"));
        assert_eq!(dispatcher.len(), 1);
        assert_eq!(dispatcher.names(), vec!["echo"]);
    }

    #[test]
    fn test_signature_lookup() {
        let (dispatcher, _) = recording_dispatcher(&[ArgKind::Double, ArgKind::Boolean]);
        assert_eq!(
            dispatcher.signature("Test"),
            Some(&[ArgKind::Double, ArgKind::Boolean][..])
        );
        assert_eq!(dispatcher.signature("missing"), None);
    }

    #[test]
    fn test_count_arguments() {
        assert_eq!(count_arguments("test", "test"), 0);
        assert_eq!(count_arguments("test a b", "test"), 2);
        assert_eq!(count_arguments("test,x", "test"), 1);
        assert_eq!(count_arguments("test a test", "test"), 2);
    }
}
