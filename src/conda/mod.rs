//! Package manager access.
//!
//! Everything conda-sync needs from the package manager goes through the
//! [`PackageManager`] trait: [`CondaCli`] drives the real executable and
//! [`MockPackageManager`] records calls for tests.

pub mod cli;
pub mod environment;
pub mod mock;

pub use cli::CondaCli;
pub use environment::{check_environment, environment_exists};
pub use mock::{MockCall, MockPackageManager};

use std::fmt;
use std::path::Path;

use crate::error::Result;
use crate::shell::{CommandLine, CommandResult, OutputCallback};

/// Provisioning actions that modify an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionAction {
    /// Create a new environment from a requirements file.
    Create,
    /// Install a requirements file into an existing environment.
    Install,
}

impl ProvisionAction {
    /// Package manager subcommand for this action.
    pub fn subcommand(&self) -> &'static str {
        match self {
            ProvisionAction::Create => "create",
            ProvisionAction::Install => "install",
        }
    }
}

impl fmt::Display for ProvisionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subcommand())
    }
}

/// Operations conda-sync performs against a package manager.
pub trait PackageManager {
    /// Raw output of the "list environments" command.
    ///
    /// Fails if the executable is missing or exits non-zero.
    fn list_environments(&self) -> Result<String>;

    /// Raw output of the explicit package listing for `env_name`.
    ///
    /// Fails if the executable is missing or exits non-zero.
    fn list_explicit(&self, env_name: &str) -> Result<String>;

    /// The command line a provisioning action runs.
    fn provision_command(
        &self,
        action: ProvisionAction,
        manifest: &Path,
        env_name: &str,
    ) -> CommandLine;

    /// Run a provisioning action, streaming its output to `on_output`.
    ///
    /// A non-zero exit is reported through the returned [`CommandResult`];
    /// only a failure to start the command is an `Err`.
    fn provision(
        &self,
        action: ProvisionAction,
        manifest: &Path,
        env_name: &str,
        on_output: OutputCallback<'_>,
    ) -> Result<CommandResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provision_action_subcommands() {
        assert_eq!(ProvisionAction::Create.subcommand(), "create");
        assert_eq!(ProvisionAction::Install.to_string(), "install");
    }
}
