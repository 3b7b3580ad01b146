//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use conda_sync::packages::Side;
//! use conda_sync::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.show_difference("numpy=1.26.4", Side::Requirements);
//!
//! assert_eq!(
//!     ui.differences(),
//!     &[("numpy=1.26.4".to_string(), Side::Requirements)]
//! );
//! ```

use crate::packages::Side;
use crate::shell::OutputLine;

use super::UserInterface;

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    messages: Vec<String>,
    details: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    differences: Vec<(String, Side)>,
    commands: Vec<String>,
    command_output: Vec<OutputLine>,
}

impl MockUI {
    /// Create a new MockUI.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured diagnostic lines.
    pub fn details(&self) -> &[String] {
        &self.details
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all reported package differences, in display order.
    pub fn differences(&self) -> &[(String, Side)] {
        &self.differences
    }

    /// Get all commands that were announced.
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Get all relayed command output.
    pub fn command_outputs(&self) -> &[OutputLine] {
        &self.command_output
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific diagnostic line was shown.
    pub fn has_detail(&self, msg: &str) -> bool {
        self.details.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn detail(&mut self, msg: &str) {
        self.details.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn show_header(&mut self, title: &str) {
        self.details.push(title.to_string());
    }

    fn show_difference(&mut self, package: &str, side: Side) {
        self.differences.push((package.to_string(), side));
    }

    fn show_command(&mut self, command: &str) {
        self.commands.push(command.to_string());
    }

    fn command_output(&mut self, line: &OutputLine) {
        self.command_output.push(line.clone());
    }
}
