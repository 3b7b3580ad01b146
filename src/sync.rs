//! Reconciliation of an environment against its requirements file.
//!
//! [`Reconciler`] sequences the whole run: report the base directory,
//! check whether the environment exists, then either diff and install or
//! create it from scratch.
//!
//! # Example
//!
//! ```
//! use conda_sync::conda::MockPackageManager;
//! use conda_sync::config::SyncConfig;
//! use conda_sync::sync::{Reconciler, SyncOutcome};
//! use conda_sync::ui::MockUI;
//! use conda_sync::workspace::BaseDirectory;
//! use std::path::Path;
//!
//! let config = SyncConfig::default();
//! let base = BaseDirectory::resolve(Path::new("/work"), None);
//! let pm = MockPackageManager::new();
//! let mut ui = MockUI::new();
//!
//! let outcome = Reconciler::new(&config, &base, &pm).run(&mut ui).unwrap();
//! assert!(matches!(outcome, SyncOutcome::Created { .. }));
//! ```

use std::path::PathBuf;

use crate::conda::{check_environment, PackageManager, ProvisionAction};
use crate::config::SyncConfig;
use crate::error::Result;
use crate::packages::{compare_package_lists, installed_packages, read_manifest, PackageDiff};
use crate::provision::{build_environment, install_requirements, ProvisionOutcome};
use crate::ui::UserInterface;
use crate::workspace::BaseDirectory;

/// What a sync run did.
///
/// A `result` of `None` means the provisioning step was skipped because
/// of a dry run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The environment already matches the requirements file.
    Identical,
    /// The environment did not exist and was created.
    Created { result: Option<ProvisionOutcome> },
    /// The environment differed and the requirements were installed.
    Updated {
        diff: PackageDiff,
        result: Option<ProvisionOutcome>,
    },
}

impl SyncOutcome {
    /// The provisioning result, if a provisioning step ran.
    pub fn provision_result(&self) -> Option<&ProvisionOutcome> {
        match self {
            SyncOutcome::Identical => None,
            SyncOutcome::Created { result } | SyncOutcome::Updated { result, .. } => {
                result.as_ref()
            }
        }
    }

    /// False only when a provisioning step ran and failed.
    pub fn is_success(&self) -> bool {
        self.provision_result()
            .map_or(true, ProvisionOutcome::is_success)
    }
}

/// Reconciles one environment against one requirements file.
pub struct Reconciler<'a> {
    config: &'a SyncConfig,
    base: &'a BaseDirectory,
    pm: &'a dyn PackageManager,
    dry_run: bool,
}

impl<'a> Reconciler<'a> {
    /// Create a reconciler.
    pub fn new(
        config: &'a SyncConfig,
        base: &'a BaseDirectory,
        pm: &'a dyn PackageManager,
    ) -> Self {
        Self {
            config,
            base,
            pm,
            dry_run: false,
        }
    }

    /// Report what would be run instead of running it.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Absolute path of the requirements file.
    pub fn manifest_path(&self) -> PathBuf {
        self.base.join(&self.config.manifest)
    }

    /// Run the full reconciliation.
    pub fn run(&self, ui: &mut dyn UserInterface) -> Result<SyncOutcome> {
        let env_name = self.config.env_name.as_str();
        let manifest = self.manifest_path();

        match self.diff(ui)? {
            Some(diff) if diff.is_empty() => {
                ui.success(&format!(
                    "The conda environment ({}) packages and the requirements file are identical.",
                    env_name
                ));
                Ok(SyncOutcome::Identical)
            }
            Some(diff) => {
                let result = if self.dry_run {
                    self.show_dry_run(ProvisionAction::Install, ui);
                    None
                } else {
                    let outcome = install_requirements(self.pm, &manifest, env_name, ui)?;
                    report(&outcome, ProvisionAction::Install, env_name, ui);
                    Some(outcome)
                };
                Ok(SyncOutcome::Updated { diff, result })
            }
            None => {
                ui.message(&format!(
                    "The conda environment ({}) does not exist and will be created.",
                    env_name
                ));
                let result = if self.dry_run {
                    self.show_dry_run(ProvisionAction::Create, ui);
                    None
                } else {
                    let outcome = build_environment(self.pm, &manifest, env_name, ui)?;
                    report(&outcome, ProvisionAction::Create, env_name, ui);
                    Some(outcome)
                };
                Ok(SyncOutcome::Created { result })
            }
        }
    }

    /// Compare the environment with the requirements file without changing
    /// anything.
    ///
    /// Returns `None` when the environment does not exist. A non-empty diff
    /// is shown on the UI.
    pub fn diff(&self, ui: &mut dyn UserInterface) -> Result<Option<PackageDiff>> {
        let env_name = self.config.env_name.as_str();

        for line in self.base.describe() {
            ui.detail(&line);
        }

        if !check_environment(self.pm, env_name)? {
            return Ok(None);
        }

        let installed = installed_packages(self.pm, env_name)?;
        let required = read_manifest(&self.manifest_path())?;
        tracing::debug!("Conda list: {:?}", installed);
        tracing::debug!("Requirements list: {:?}", required);

        let diff = compare_package_lists(&installed, &required);
        tracing::info!(
            "{} package(s) differ between '{}' and {}",
            diff.len(),
            env_name,
            self.config.manifest.display()
        );

        if !diff.is_empty() {
            ui.show_header(
                "The following packages are different between the conda environment and the requirements file:",
            );
            for (package, side) in diff.iter() {
                ui.show_difference(package, side);
            }
        }

        Ok(Some(diff))
    }

    fn show_dry_run(&self, action: ProvisionAction, ui: &mut dyn UserInterface) {
        let command = self
            .pm
            .provision_command(action, &self.manifest_path(), &self.config.env_name);
        ui.show_command(&command.to_string());
        ui.message("Dry run: no changes made.");
    }
}

fn report(
    outcome: &ProvisionOutcome,
    action: ProvisionAction,
    env_name: &str,
    ui: &mut dyn UserInterface,
) {
    let verb = match action {
        ProvisionAction::Create => "created",
        ProvisionAction::Install => "updated",
    };

    match outcome {
        ProvisionOutcome::Succeeded => {
            ui.success(&format!("Environment '{}' {}.", env_name, verb));
        }
        ProvisionOutcome::Failed { exit_code, output } => {
            let code = exit_code.map_or_else(|| "signal".to_string(), |c| c.to_string());
            ui.error(&format!(
                "conda {} for environment '{}' failed (exit {})",
                action, env_name, code
            ));
            if !output.is_empty() {
                ui.message(output);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conda::MockCall;
    use crate::conda::MockPackageManager;
    use crate::packages::Side;
    use crate::ui::MockUI;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn setup(manifest: &str) -> (TempDir, SyncConfig, BaseDirectory) {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("requirements.txt"), manifest).unwrap();
        let base = BaseDirectory::resolve(temp.path(), None);
        (temp, SyncConfig::default(), base)
    }

    #[test]
    fn missing_environment_is_created() {
        let (temp, config, base) = setup("pkg-a=1.0\n");
        let pm = MockPackageManager::new();
        let mut ui = MockUI::new();

        let outcome = Reconciler::new(&config, &base, &pm).run(&mut ui).unwrap();

        assert_eq!(
            outcome,
            SyncOutcome::Created {
                result: Some(ProvisionOutcome::Succeeded)
            }
        );
        assert_eq!(
            pm.calls(),
            vec![
                MockCall::ListEnvironments,
                MockCall::Provision {
                    action: ProvisionAction::Create,
                    manifest: temp.path().join("requirements.txt"),
                    env_name: "ml".to_string(),
                }
            ]
        );
        assert!(ui.has_message("The conda environment (ml) does not exist and will be created."));
        assert!(ui.has_success("Environment 'ml' created."));
    }

    #[test]
    fn differing_environment_is_updated() {
        let (temp, config, base) = setup("pkg-a=1.0\npkg-c=3.0\n");
        let pm = MockPackageManager::new()
            .with_environment("ml")
            .with_installed("ml", "pkg-a=1.0\npkg-b=2.0\n");
        let mut ui = MockUI::new();

        let outcome = Reconciler::new(&config, &base, &pm).run(&mut ui).unwrap();

        let SyncOutcome::Updated { diff, result } = outcome else {
            panic!("expected update");
        };
        assert_eq!(diff.len(), 2);
        assert_eq!(diff.get("pkg-b=2.0"), Some(Side::Conda));
        assert_eq!(diff.get("pkg-c=3.0"), Some(Side::Requirements));
        assert_eq!(result, Some(ProvisionOutcome::Succeeded));
        assert_eq!(
            pm.provisions(),
            vec![(
                ProvisionAction::Install,
                temp.path().join("requirements.txt"),
                "ml".to_string()
            )]
        );
        assert_eq!(
            ui.differences(),
            &[
                ("pkg-b=2.0".to_string(), Side::Conda),
                ("pkg-c=3.0".to_string(), Side::Requirements)
            ]
        );
    }

    #[test]
    fn identical_environment_is_left_alone() {
        let (_temp, config, base) = setup("pkg-a=1.0\npkg-b=2.0\n");
        let pm = MockPackageManager::new()
            .with_environment("ml")
            .with_installed("ml", "pkg-a=1.0\npkg-b=2.0\n");
        let mut ui = MockUI::new();

        let outcome = Reconciler::new(&config, &base, &pm).run(&mut ui).unwrap();

        assert_eq!(outcome, SyncOutcome::Identical);
        assert!(pm.provisions().is_empty());
        assert!(ui.has_success("packages and the requirements file are identical"));
    }

    #[test]
    fn dry_run_does_not_provision() {
        let (_temp, config, base) = setup("pkg-a=1.0\n");
        let pm = MockPackageManager::new();
        let mut ui = MockUI::new();

        let outcome = Reconciler::new(&config, &base, &pm)
            .dry_run(true)
            .run(&mut ui)
            .unwrap();

        assert_eq!(outcome, SyncOutcome::Created { result: None });
        assert!(outcome.is_success());
        assert!(pm.provisions().is_empty());
        assert!(ui.commands()[0].starts_with("conda create -y --name ml --file "));
        assert!(ui.has_message("Dry run"));
    }

    #[test]
    fn provision_failure_is_reported() {
        let (_temp, config, base) = setup("pkg-a=1.0\n");
        let pm = MockPackageManager::new().with_provision_failure(1, "CondaHTTPError");
        let mut ui = MockUI::new();

        let outcome = Reconciler::new(&config, &base, &pm).run(&mut ui).unwrap();

        assert!(!outcome.is_success());
        assert!(ui.has_error("conda create for environment 'ml' failed (exit 1)"));
        assert!(ui.has_message("CondaHTTPError"));
    }

    #[test]
    fn missing_manifest_aborts_before_install() {
        let temp = TempDir::new().unwrap();
        let config = SyncConfig::default();
        let base = BaseDirectory::resolve(temp.path(), None);
        let pm = MockPackageManager::new()
            .with_environment("ml")
            .with_installed("ml", "pkg-a=1.0\n");
        let mut ui = MockUI::new();

        let err = Reconciler::new(&config, &base, &pm).run(&mut ui).unwrap_err();

        assert!(matches!(err, crate::error::SyncError::ManifestNotFound { .. }));
        assert!(pm.provisions().is_empty());
    }

    #[test]
    fn listing_failure_aborts() {
        let (_temp, config, base) = setup("pkg-a=1.0\n");
        let pm = MockPackageManager::new().with_failing_listing();
        let mut ui = MockUI::new();

        assert!(Reconciler::new(&config, &base, &pm).run(&mut ui).is_err());
        assert!(pm.provisions().is_empty());
    }

    #[test]
    fn diff_of_missing_environment_is_none() {
        let (_temp, config, base) = setup("pkg-a=1.0\n");
        let pm = MockPackageManager::new();
        let mut ui = MockUI::new();

        let diff = Reconciler::new(&config, &base, &pm).diff(&mut ui).unwrap();

        assert!(diff.is_none());
        assert_eq!(pm.calls(), vec![MockCall::ListEnvironments]);
    }

    #[test]
    fn base_directory_is_reported() {
        let (temp, config, _) = setup("pkg-a=1.0\n");
        let base = BaseDirectory::resolve(Path::new("/somewhere/else"), Some(temp.path()));
        let pm = MockPackageManager::new();
        let mut ui = MockUI::new();

        Reconciler::new(&config, &base, &pm).diff(&mut ui).unwrap();

        assert!(ui.has_detail("current working directory: /somewhere/else"));
        assert!(ui.has_detail(&format!("base directory: {}", temp.path().display())));
    }

    #[test]
    fn custom_environment_and_manifest_are_used() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("envs")).unwrap();
        fs::write(temp.path().join("envs/vision.txt"), "torch=2.2\n").unwrap();
        let config = SyncConfig {
            env_name: "vision".into(),
            manifest: PathBuf::from("envs/vision.txt"),
            ..Default::default()
        };
        let base = BaseDirectory::resolve(temp.path(), None);
        let pm = MockPackageManager::new()
            .with_environment("vision")
            .with_installed("vision", "torch=2.1\n");
        let mut ui = MockUI::new();

        Reconciler::new(&config, &base, &pm).run(&mut ui).unwrap();

        assert_eq!(
            pm.provisions(),
            vec![(
                ProvisionAction::Install,
                temp.path().join("envs/vision.txt"),
                "vision".to_string()
            )]
        );
    }
}
