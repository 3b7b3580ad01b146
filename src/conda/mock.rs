//! In-memory package manager for tests.
//!
//! # Example
//!
//! ```
//! use conda_sync::conda::{check_environment, MockCall, MockPackageManager};
//!
//! let pm = MockPackageManager::new().with_environment("ml");
//! assert!(check_environment(&pm, "ml").unwrap());
//! assert_eq!(pm.calls(), vec![MockCall::ListEnvironments]);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, SyncError};
use crate::shell::{CommandLine, CommandResult, OutputCallback, OutputLine};

use super::{PackageManager, ProvisionAction};

/// A recorded call against [`MockPackageManager`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    ListEnvironments,
    ListExplicit(String),
    Provision {
        action: ProvisionAction,
        manifest: PathBuf,
        env_name: String,
    },
}

/// [`PackageManager`] that serves canned listings and records every call.
#[derive(Debug, Default)]
pub struct MockPackageManager {
    environments: Vec<String>,
    installed: HashMap<String, String>,
    listing_fails: bool,
    provision_exit: Option<(i32, String)>,
    provision_output: Vec<OutputLine>,
    calls: RefCell<Vec<MockCall>>,
}

impl MockPackageManager {
    /// A package manager that knows only the `base` environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an existing environment.
    pub fn with_environment(mut self, name: &str) -> Self {
        self.environments.push(name.to_string());
        self
    }

    /// Set the explicit package listing of an environment.
    pub fn with_installed(mut self, name: &str, listing: &str) -> Self {
        self.installed.insert(name.to_string(), listing.to_string());
        self
    }

    /// Make every listing command fail as if it exited non-zero.
    pub fn with_failing_listing(mut self) -> Self {
        self.listing_fails = true;
        self
    }

    /// Make provisioning exit with `code`, reporting `stderr`.
    pub fn with_provision_failure(mut self, code: i32, stderr: &str) -> Self {
        self.provision_exit = Some((code, stderr.to_string()));
        self
    }

    /// Lines emitted while provisioning.
    pub fn with_provision_output(mut self, lines: Vec<OutputLine>) -> Self {
        self.provision_output = lines;
        self
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.borrow().clone()
    }

    /// Provisioning calls made so far.
    pub fn provisions(&self) -> Vec<(ProvisionAction, PathBuf, String)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                MockCall::Provision {
                    action,
                    manifest,
                    env_name,
                } => Some((*action, manifest.clone(), env_name.clone())),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: MockCall) {
        self.calls.borrow_mut().push(call);
    }

    fn listing_failure(&self, command: &str) -> Result<String> {
        Err(SyncError::CommandFailed {
            command: command.to_string(),
            code: Some(1),
            stderr: "mock listing failure".to_string(),
        })
    }

    fn render_listing(&self) -> String {
        let mut listing = String::from("# conda environments:\n#\n");
        listing.push_str("base                  *  /opt/conda\n");
        for name in &self.environments {
            listing.push_str(&format!("{:<25}/opt/conda/envs/{}\n", name, name));
        }
        listing
    }
}

impl PackageManager for MockPackageManager {
    fn list_environments(&self) -> Result<String> {
        self.record(MockCall::ListEnvironments);
        if self.listing_fails {
            return self.listing_failure("conda env list");
        }
        Ok(self.render_listing())
    }

    fn list_explicit(&self, env_name: &str) -> Result<String> {
        self.record(MockCall::ListExplicit(env_name.to_string()));
        if self.listing_fails {
            return self.listing_failure("conda list --explicit");
        }
        match self.installed.get(env_name) {
            Some(listing) => Ok(listing.clone()),
            None if self.environments.iter().any(|e| e == env_name) => Ok(String::new()),
            None => Err(SyncError::CommandFailed {
                command: format!("conda list --explicit --name {}", env_name),
                code: Some(1),
                stderr: format!("EnvironmentLocationNotFound: {}", env_name),
            }),
        }
    }

    fn provision_command(
        &self,
        action: ProvisionAction,
        manifest: &Path,
        env_name: &str,
    ) -> CommandLine {
        CommandLine::new("conda")
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
        mut on_output: OutputCallback<'_>,
    ) -> Result<CommandResult> {
        self.record(MockCall::Provision {
            action,
            manifest: manifest.to_path_buf(),
            env_name: env_name.to_string(),
        });

        for line in &self.provision_output {
            on_output(line.clone());
        }

        Ok(match &self.provision_exit {
            Some((code, stderr)) => CommandResult::failure(
                Some(*code),
                String::new(),
                stderr.clone(),
                Duration::ZERO,
            ),
            None => CommandResult::success(String::new(), String::new(), Duration::ZERO),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_includes_registered_environments() {
        let pm = MockPackageManager::new().with_environment("ml");
        let listing = pm.list_environments().unwrap();
        assert!(listing.contains("ml "));
        assert!(listing.contains("/opt/conda/envs/ml"));
    }

    #[test]
    fn unknown_environment_listing_fails() {
        let pm = MockPackageManager::new();
        assert!(pm.list_explicit("ml").is_err());
    }

    #[test]
    fn records_provision_calls() {
        let pm = MockPackageManager::new();
        let result = pm
            .provision(
                ProvisionAction::Create,
                Path::new("requirements.txt"),
                "ml",
                Box::new(|_: OutputLine| {}),
            )
            .unwrap();

        assert!(result.success);
        assert_eq!(
            pm.provisions(),
            vec![(
                ProvisionAction::Create,
                PathBuf::from("requirements.txt"),
                "ml".to_string()
            )]
        );
    }

    #[test]
    fn provision_failure_is_reported_in_result() {
        let pm = MockPackageManager::new().with_provision_failure(1, "PackagesNotFoundError");
        let result = pm
            .provision(
                ProvisionAction::Install,
                Path::new("requirements.txt"),
                "ml",
                Box::new(|_: OutputLine| {}),
            )
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(1));
        assert!(result.stderr.contains("PackagesNotFoundError"));
    }
}
