//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::PathBuf;

use crate::cli::args::{Cli, Commands, SyncArgs};
use crate::error::Result;
use crate::ui::UserInterface;
use crate::workspace::BaseDirectory;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    base: BaseDirectory,
    config_path: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a new dispatcher.
    pub fn new(base: BaseDirectory, config_path: Option<PathBuf>) -> Self {
        Self { base, config_path }
    }

    /// Get the base directory.
    pub fn base(&self) -> &BaseDirectory {
        &self.base
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Sync(args)) => self.sync(args.clone()).execute(ui),
            Some(Commands::Diff(args)) => {
                let cmd = super::diff::DiffCommand::new(
                    self.base.clone(),
                    self.config_path.clone(),
                    args.clone(),
                );
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            // Default to sync with default args
            None => self.sync(SyncArgs::default()).execute(ui),
        }
    }

    fn sync(&self, args: SyncArgs) -> super::sync::SyncCommand {
        super::sync::SyncCommand::new(self.base.clone(), self.config_path.clone(), args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatcher_creation() {
        let base = BaseDirectory::resolve(Path::new("/test"), None);
        let dispatcher = CommandDispatcher::new(base, None);
        assert_eq!(dispatcher.base().path(), Path::new("/test"));
    }
}
