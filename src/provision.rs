//! Environment creation and installation.
//!
//! Both actions run the package manager to completion and surface its exit
//! status as a [`ProvisionOutcome`] instead of discarding it.

use std::path::Path;

use crate::conda::{PackageManager, ProvisionAction};
use crate::error::Result;
use crate::shell::OutputLine;
use crate::ui::UserInterface;

/// Number of trailing output lines kept in a failure report.
const FAILURE_TAIL_LINES: usize = 20;

/// Result of a provisioning action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// The package manager exited with status 0.
    Succeeded,
    /// The package manager exited non-zero (or was killed by a signal).
    Failed {
        /// Exit code, if the process exited normally.
        exit_code: Option<i32>,
        /// Tail of the captured stdout and stderr.
        output: String,
    },
}

impl ProvisionOutcome {
    /// Whether the action succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, ProvisionOutcome::Succeeded)
    }
}

/// Create `env_name` from the requirements file at `manifest`.
pub fn build_environment(
    pm: &dyn PackageManager,
    manifest: &Path,
    env_name: &str,
    ui: &mut dyn UserInterface,
) -> Result<ProvisionOutcome> {
    run(pm, ProvisionAction::Create, manifest, env_name, ui)
}

/// Install the requirements file at `manifest` into the existing `env_name`.
pub fn install_requirements(
    pm: &dyn PackageManager,
    manifest: &Path,
    env_name: &str,
    ui: &mut dyn UserInterface,
) -> Result<ProvisionOutcome> {
    run(pm, ProvisionAction::Install, manifest, env_name, ui)
}

fn run(
    pm: &dyn PackageManager,
    action: ProvisionAction,
    manifest: &Path,
    env_name: &str,
    ui: &mut dyn UserInterface,
) -> Result<ProvisionOutcome> {
    let command = pm.provision_command(action, manifest, env_name);
    ui.show_command(&command.to_string());
    tracing::info!("Running {} for environment '{}'", action, env_name);

    let result = pm.provision(
        action,
        manifest,
        env_name,
        Box::new(|line: OutputLine| ui.command_output(&line)),
    )?;

    if result.success {
        tracing::debug!("{} finished in {:?}", command, result.duration);
        return Ok(ProvisionOutcome::Succeeded);
    }

    tracing::warn!("{} exited with {:?}", command, result.exit_code);
    let combined = format!("{}{}", result.stdout, result.stderr);
    Ok(ProvisionOutcome::Failed {
        exit_code: result.exit_code,
        output: tail(&combined, FAILURE_TAIL_LINES),
    })
}

/// Last `n` non-empty lines of `text`.
fn tail(text: &str, n: usize) -> String {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}
