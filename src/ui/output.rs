//! Output verbosity.

use crate::shell::OutputLine;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show everything, including package manager stderr.
    Verbose,
    /// Show progress, diagnostics, status and package manager stdout.
    #[default]
    Normal,
    /// Show final status and errors only.
    Quiet,
}

impl OutputMode {
    /// Pick a mode from the `--verbose` / `--quiet` flags. Quiet wins.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if this mode relays `line` from a running package manager.
    pub fn shows_command_output(&self, line: &OutputLine) -> bool {
        match line {
            OutputLine::Stdout(_) => matches!(self, Self::Verbose | Self::Normal),
            OutputLine::Stderr(_) => matches!(self, Self::Verbose),
        }
    }

    /// Check if this mode shows diagnostic and progress lines.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose | Self::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_mode_from_flags() {
        assert_eq!(OutputMode::from_flags(false, false), OutputMode::Normal);
        assert_eq!(OutputMode::from_flags(true, false), OutputMode::Verbose);
        assert_eq!(OutputMode::from_flags(true, true), OutputMode::Quiet);
    }

    #[test]
    fn output_mode_shows_command_output() {
        let stdout = OutputLine::Stdout("Solving environment: done".into());
        let stderr = OutputLine::Stderr("warning: libmamba".into());

        assert!(OutputMode::Verbose.shows_command_output(&stdout));
        assert!(OutputMode::Verbose.shows_command_output(&stderr));
        assert!(OutputMode::Normal.shows_command_output(&stdout));
        assert!(!OutputMode::Normal.shows_command_output(&stderr));
        assert!(!OutputMode::Quiet.shows_command_output(&stdout));
        assert!(!OutputMode::Quiet.shows_command_output(&stderr));
    }

    #[test]
    fn output_mode_shows_details() {
        assert!(OutputMode::Verbose.shows_details());
        assert!(OutputMode::Normal.shows_details());
        assert!(!OutputMode::Quiet.shows_details());
    }

    #[test]
    fn output_mode_default() {
        assert_eq!(OutputMode::default(), OutputMode::Normal);
    }
}
