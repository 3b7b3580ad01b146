//! Terminal UI.

use console::Term;
use std::io::Write;

use crate::packages::Side;
use crate::shell::OutputLine;

use super::{should_use_colors, OutputMode, SyncTheme, UserInterface};

/// Terminal UI implementation.
///
/// Regular output goes to stdout; warnings, errors and relayed stderr
/// from the package manager go to stderr.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: SyncTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            SyncTheme::new()
        } else {
            SyncTheme::plain()
        };

        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn detail(&mut self, msg: &str) {
        if self.mode.shows_details() {
            writeln!(self.out, "{}", self.theme.dim.apply_to(msg)).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_details() {
            writeln!(self.out, "{}", self.theme.format_header(title)).ok();
        }
    }

    fn show_difference(&mut self, package: &str, side: Side) {
        let style = match side {
            Side::Conda => &self.theme.installed_only,
            Side::Requirements => &self.theme.required_only,
        };
        writeln!(
            self.out,
            "{} ({})",
            style.apply_to(package),
            self.theme.dim.apply_to(side)
        )
        .ok();
    }

    fn show_command(&mut self, command: &str) {
        if self.mode.shows_details() {
            writeln!(self.out, "{}", self.theme.format_command(command)).ok();
        }
    }

    fn command_output(&mut self, line: &OutputLine) {
        if !self.mode.shows_command_output(line) {
            return;
        }
        match line {
            OutputLine::Stdout(text) => writeln!(self.out, "  {}", text).ok(),
            OutputLine::Stderr(text) => {
                writeln!(self.err, "  {}", self.theme.dim.apply_to(text)).ok()
            }
        };
    }
}

/// Create the UI for the given output mode.
pub fn create_ui(mode: OutputMode) -> Box<dyn UserInterface> {
    Box::new(TerminalUI::new(mode))
}
