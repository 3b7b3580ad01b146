//! Command-line interface for conda-sync.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, CompletionsArgs, DiffArgs, SyncArgs, TargetArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
