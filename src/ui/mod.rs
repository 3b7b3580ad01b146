//! User-facing terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for real terminal usage
//! - [`MockUI`] for capturing output in tests
//!
//! # Example
//!
//! ```
//! use conda_sync::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Checking environment");
//! ui.success("Done!");
//! assert!(ui.has_success("Done!"));
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, SyncTheme};

use crate::packages::Side;
use crate::shell::OutputLine;

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a diagnostic line (hidden in quiet mode).
    fn detail(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message.
    fn error(&mut self, msg: &str);

    /// Show a header/banner.
    fn show_header(&mut self, title: &str);

    /// Show a package that differs between the environment and the manifest.
    fn show_difference(&mut self, package: &str, side: Side);

    /// Show a command that is about to run (or would run, in a dry run).
    fn show_command(&mut self, command: &str);

    /// Relay one line of output from a running command.
    fn command_output(&mut self, line: &OutputLine);
}
