//! The conda command-line executable.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::shell::{
    execute_checked, execute_streaming, CommandLine, CommandOptions, CommandResult, OutputCallback,
};

use super::{PackageManager, ProvisionAction};

/// Default package manager executable.
pub const DEFAULT_EXECUTABLE: &str = "conda";

/// [`PackageManager`] backed by a conda-compatible executable.
///
/// Works with `conda`, `mamba` and `micromamba`, which share the
/// `env list` / `list --explicit` / `create` / `install` vocabulary.
#[derive(Debug, Clone)]
pub struct CondaCli {
    executable: OsString,
    cwd: Option<PathBuf>,
}

impl Default for CondaCli {
    fn default() -> Self {
        Self::new(DEFAULT_EXECUTABLE)
    }
}

impl CondaCli {
    /// Use the given executable name or path.
    pub fn new(executable: impl Into<OsString>) -> Self {
        Self {
            executable: executable.into(),
            cwd: None,
        }
    }

    /// Run every command from `dir`.
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// The executable this instance invokes.
    pub fn executable(&self) -> &OsString {
        &self.executable
    }

    fn command(&self) -> CommandLine {
        CommandLine::new(self.executable.clone())
    }

    fn options(&self) -> CommandOptions {
        CommandOptions::captured(self.cwd.clone())
    }

    /// `<conda> env list`
    pub fn env_list_command(&self) -> CommandLine {
        self.command().args(["env", "list"])
    }

    /// `<conda> list --explicit --name <env>`
    pub fn list_explicit_command(&self, env_name: &str) -> CommandLine {
        self.command()
            .args(["list", "--explicit", "--name"])
            .arg(env_name)
    }
}

impl PackageManager for CondaCli {
    fn list_environments(&self) -> Result<String> {
        execute_checked(&self.env_list_command(), &self.options())
    }

    fn list_explicit(&self, env_name: &str) -> Result<String> {
        execute_checked(&self.list_explicit_command(env_name), &self.options())
    }

    fn provision_command(
        &self,
        action: ProvisionAction,
        manifest: &Path,
        env_name: &str,
    ) -> CommandLine {
        self.command()
            .args([action.subcommand(), "-y", "--name"])
            .arg(env_name)
            .arg("--file")
            .arg(manifest)
    }

    fn provision(
        &self,
        action: ProvisionAction,
        manifest: &Path,
        env_name: &str,
        on_output: OutputCallback<'_>,
    ) -> Result<CommandResult> {
        let command = self.provision_command(action, manifest, env_name);
        execute_streaming(&command, &self.options(), on_output)
    }
}
