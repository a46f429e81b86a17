//! Command implementations for the CLI

use crate::{
    cli::{Command, builtins::builtin_dispatcher},
    config::Config,
    core::{CommandResult, CommandStatus, Dispatcher},
};
use anyhow::{Context, bail};
use tracing::{debug, error, info, instrument, warn};

/// Execute the appropriate command based on CLI arguments
#[instrument(skip(config))]
pub fn execute_command(config: &Config, command: &Command) -> anyhow::Result<()> {
    let dispatcher = builtin_dispatcher().context("Failed to register built-in commands")?;
    debug!("Registered {} built-in commands", dispatcher.len());

    match command {
        Command::Run { words } => execute_line(&dispatcher, &words.join(" ")),
        Command::Script { .. } => execute_script_command(config, &dispatcher),
        Command::List => execute_list_command(&dispatcher),
    }
}

/// Dispatch one line and present its result
fn execute_line(dispatcher: &Dispatcher, line: &str) -> anyhow::Result<()> {
    let result = dispatcher
        .parse_and_run(line)
        .with_context(|| format!("Failed to run '{line}'"))?;
    report(result)
}

/// Print the result text; `Fail` and `Unparseable` become errors
fn report(result: CommandResult) -> anyhow::Result<()> {
    match result.status {
        CommandStatus::Success => {
            println!("{}", result.text);
            Ok(())
        }
        CommandStatus::Warning => {
            warn!("Command finished with warnings");
            println!("{}", result.text);
            Ok(())
        }
        CommandStatus::Fail | CommandStatus::Unparseable => {
            bail!("Command {}: {}", result.status, result.text)
        }
    }
}

/// Execute the script command
#[instrument(skip(config, dispatcher))]
fn execute_script_command(config: &Config, dispatcher: &Dispatcher) -> anyhow::Result<()> {
    let Some(path) = &config.script_path else {
        bail!("No script file configured");
    };
    info!("Running script: {}", path.display());

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;

    let mut total = 0;
    let mut failures = 0;
    for (index, line) in content.lines().enumerate() {
        if config.is_ignored_line(line) {
            continue;
        }
        total += 1;

        let line_number = index + 1;
        if let Err(e) = execute_line(dispatcher, line.trim()) {
            if !config.keep_going {
                return Err(e.context(format!("Script stopped on line {line_number}")));
            }
            error!("Line {}: {:#}", line_number, e);
            failures += 1;
        }
    }

    if failures > 0 {
        bail!("{failures} of {total} commands failed");
    }

    info!("Script completed successfully. {} commands run", total);
    Ok(())
}

/// Execute the list command
fn execute_list_command(dispatcher: &Dispatcher) -> anyhow::Result<()> {
    for name in dispatcher.names() {
        let signature = dispatcher
            .signature(name)
            .with_context(|| format!("Command {name} vanished from the registry"))?;
        let params: Vec<String> = signature.iter().map(|kind| format!("<{kind}>")).collect();
        if params.is_empty() {
            println!("{name}");
        } else {
            println!("{} {}", name, params.join(" "));
        }
    }
    Ok(())
}
