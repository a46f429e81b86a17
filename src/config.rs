//! Configuration management for the command runner
//!
//! Centralizes configuration options and provides validation.

use crate::{cli::Args, error::CommandError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Keep dispatching script lines after a failure
    pub keep_going: bool,
    /// Script file to dispatch line by line
    pub script_path: Option<PathBuf>,
    /// Script lines starting with this prefix are skipped
    pub comment_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keep_going: false,
            script_path: None,
            comment_prefix: "#".to_string(),
        }
    }
}

impl Config {
    /// Create configuration from command line arguments
    pub fn from_args(args: &Args) -> Result<Self, CommandError> {
        let mut config = Self::default();

        if let crate::cli::Command::Script {
            path,
            keep_going,
            comment_prefix,
        } = &args.command
        {
            config.script_path = Some(path.clone());
            config.keep_going = *keep_going;
            config.comment_prefix = comment_prefix.clone();
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), CommandError> {
        if let Some(path) = &self.script_path {
            if !path.is_file() {
                return Err(CommandError::config(format!(
                    "Script file not found: {}",
                    path.display()
                )));
            }
        }

        if self.comment_prefix.trim().is_empty() {
            return Err(CommandError::config("Comment prefix must not be empty"));
        }

        Ok(())
    }

    /// Whether a script line should be skipped
    pub fn is_ignored_line(&self, line: &str) -> bool {
        let line = line.trim();
        line.is_empty() || line.starts_with(&self.comment_prefix)
    }
}
