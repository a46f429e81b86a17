//! Built-in command set exposed by the binary

use crate::core::{ArgKind, Arguments, Command, CommandResult, Dispatcher};
use crate::error::Result;

/// Upper bound on `repeat` output pieces
const MAX_REPEAT: i32 = 64;

/// Create a dispatcher with every built-in command registered
pub fn builtin_dispatcher() -> Result<Dispatcher> {
    let mut dispatcher = Dispatcher::new();
    dispatcher.register("echo", Command::new(vec![ArgKind::String], checked(echo)))?;
    dispatcher.register("not", Command::new(vec![ArgKind::Boolean], checked(not)))?;
    dispatcher.register(
        "add",
        Command::new(vec![ArgKind::Int64, ArgKind::Int64], checked(add)),
    )?;
    dispatcher.register(
        "repeat",
        Command::new(vec![ArgKind::String, ArgKind::Int32], checked(repeat)),
    )?;
    dispatcher.register(
        "scale",
        Command::new(vec![ArgKind::Single, ArgKind::Single], checked(scale)),
    )?;
    dispatcher.register(
        "div",
        Command::new(vec![ArgKind::Double, ArgKind::Double], checked(div)),
    )?;
    Ok(dispatcher)
}

/// Turn an argument access failure into an `Unparseable` result
fn checked(
    handler: fn(&Arguments) -> Result<CommandResult>,
) -> impl Fn(&Arguments) -> CommandResult {
    move |args| handler(args).unwrap_or_else(|e| CommandResult::unparseable(e.to_string()))
}

fn echo(args: &Arguments) -> Result<CommandResult> {
    Ok(CommandResult::success(args.string(0)?))
}

fn not(args: &Arguments) -> Result<CommandResult> {
    Ok(CommandResult::success((!args.boolean(0)?).to_string()))
}

fn add(args: &Arguments) -> Result<CommandResult> {
    let result = match args.int64(0)?.checked_add(args.int64(1)?) {
        Some(sum) => CommandResult::success(sum.to_string()),
        None => CommandResult::fail("Integer overflow"),
    };
    Ok(result)
}

fn repeat(args: &Arguments) -> Result<CommandResult> {
    let text = args.string(0)?;
    let count = args.int32(1)?;

    let result = if count < 0 {
        CommandResult::unparseable(format!("Count must not be negative, got {count}"))
    } else if count > MAX_REPEAT {
        let pieces = vec![text; MAX_REPEAT as usize];
        CommandResult::warning(pieces.join(" "))
    } else {
        let pieces = vec![text; count as usize];
        CommandResult::success(pieces.join(" "))
    };
    Ok(result)
}

fn scale(args: &Arguments) -> Result<CommandResult> {
    Ok(CommandResult::success((args.single(0)? * args.single(1)?).to_string()))
}

fn div(args: &Arguments) -> Result<CommandResult> {
    let divisor = args.double(1)?;
    if divisor == 0.0 {
        return Ok(CommandResult::fail("Division by zero"));
    }
    Ok(CommandResult::success((args.double(0)? / divisor).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CommandStatus;

    fn run(line: &str) -> CommandResult {
        builtin_dispatcher().unwrap().parse_and_run(line).unwrap()
    }

    #[test]
    fn test_all_builtins_registered() {
        let dispatcher = builtin_dispatcher().unwrap();
        assert_eq!(
            dispatcher.names(),
            vec!["add", "div", "echo", "not", "repeat", "scale"]
        );
    }

    #[test]
    fn test_echo_and_not() {
        assert_eq!(run(r#"echo "say\"hi\"""#), CommandResult::success("say\"hi\""));
        assert_eq!(run("not false").text, "true");
    }

    #[test]
    fn test_add() {
        assert_eq!(run("add 40 2").text, "42");
        assert_eq!(run("add -5 -6").text, "-11");
        let result = run("add 9223372036854775807 1");
        assert_eq!(result.status, CommandStatus::Fail);
    }

    #[test]
    fn test_repeat_statuses() {
        assert_eq!(run("repeat ab 3"), CommandResult::success("ab ab ab"));
        assert_eq!(run("repeat ab 0"), CommandResult::success(""));
        assert_eq!(run("repeat ab -1").status, CommandStatus::Unparseable);

        let result = run("repeat x 100");
        assert_eq!(result.status, CommandStatus::Warning);
        assert_eq!(result.text.split(' ').count(), MAX_REPEAT as usize);
    }

    #[test]
    fn test_float_commands() {
        assert_eq!(run("scale 1.5 2").text, "3");
        assert_eq!(run("div 1 4").text, "0.25");
        assert_eq!(run("div 1 0"), CommandResult::fail("Division by zero"));
    }

    fn fourth_string(args: &Arguments) -> Result<CommandResult> {
        Ok(CommandResult::success(args.string(3)?))
    }

    #[test]
    fn test_checked_reports_access_errors() {
        let handler = checked(fourth_string);
        let result = handler(&Arguments::default());
        assert_eq!(result.status, CommandStatus::Unparseable);
        assert!(result.text.contains("Argument 3"));
    }
}
