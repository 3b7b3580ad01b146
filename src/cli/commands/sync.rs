//! Sync command implementation.
//!
//! The `conda-sync sync` command creates the environment from the
//! requirements file, or installs the requirements file into it when the
//! package lists differ. It is also what runs when no subcommand is given.

use std::path::PathBuf;

use crate::cli::args::{SyncArgs, TargetArgs};
use crate::conda::{CondaCli, PackageManager};
use crate::config::{load_config, SyncConfig};
use crate::error::{Result, SyncError};
use crate::sync::Reconciler;
use crate::ui::UserInterface;
use crate::workspace::BaseDirectory;

use super::dispatcher::{Command, CommandResult};

/// Exit code for configuration problems.
pub(crate) const CONFIG_ERROR_EXIT: i32 = 2;

/// The sync command implementation.
pub struct SyncCommand {
    base: BaseDirectory,
    config_path: Option<PathBuf>,
    args: SyncArgs,
}

impl SyncCommand {
    /// Create a new sync command.
    pub fn new(base: BaseDirectory, config_path: Option<PathBuf>, args: SyncArgs) -> Self {
        Self {
            base,
            config_path,
            args,
        }
    }

    /// Run against an explicit package manager.
    pub fn execute_with(
        &self,
        config: &SyncConfig,
        pm: &dyn PackageManager,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        tracing::debug!(
            "Syncing environment '{}' with {}",
            config.env_name,
            config.manifest.display()
        );

        let outcome = Reconciler::new(config, &self.base, pm)
            .dry_run(self.args.dry_run)
            .run(ui)?;

        if outcome.is_success() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

impl Command for SyncCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = match resolve_config(&self.base, self.config_path.as_deref(), &self.args.target)
        {
            Ok(config) => config,
            Err(e) => return config_failure(e, ui),
        };

        let pm = package_manager(&config, &self.base);
        self.execute_with(&config, &pm, ui)
    }
}

/// Load the config file and apply command-line overrides.
pub(crate) fn resolve_config(
    base: &BaseDirectory,
    config_path: Option<&std::path::Path>,
    target: &TargetArgs,
) -> Result<SyncConfig> {
    let explicit = config_path.map(|p| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            base.cwd().join(p)
        }
    });
    Ok(load_config(base.path(), explicit.as_deref())?.apply_overrides(&target.overrides()))
}

/// Report a configuration error, or pass any other error through.
pub(crate) fn config_failure(err: SyncError, ui: &mut dyn UserInterface) -> Result<CommandResult> {
    match err {
        SyncError::ConfigNotFound { .. } | SyncError::ConfigParseError { .. } => {
            ui.error(&err.to_string());
            Ok(CommandResult::failure(CONFIG_ERROR_EXIT))
        }
        other => Err(other),
    }
}

/// The real package manager for `config`, run from the base directory.
pub(crate) fn package_manager(config: &SyncConfig, base: &BaseDirectory) -> CondaCli {
    CondaCli::new(&config.conda).with_working_dir(base.path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conda::{MockPackageManager, ProvisionAction};
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn command(temp: &TempDir, args: SyncArgs) -> SyncCommand {
        SyncCommand::new(BaseDirectory::resolve(temp.path(), None), None, args)
    }

    #[test]
    fn successful_sync_exits_zero() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("requirements.txt"), "pkg-a=1.0\n").unwrap();
        let pm = MockPackageManager::new();
        let mut ui = MockUI::new();

        let result = command(&temp, SyncArgs::default())
            .execute_with(&SyncConfig::default(), &pm, &mut ui)
            .unwrap();

        assert_eq!(result, CommandResult::success());
        assert_eq!(pm.provisions()[0].0, ProvisionAction::Create);
    }

    #[test]
    fn failed_provision_exits_one() {
        let temp = TempDir::new().unwrap();
        let pm = MockPackageManager::new().with_provision_failure(1, "boom");
        let mut ui = MockUI::new();

        let result = command(&temp, SyncArgs::default())
            .execute_with(&SyncConfig::default(), &pm, &mut ui)
            .unwrap();

        assert_eq!(result, CommandResult::failure(1));
    }

    #[test]
    fn dry_run_flag_is_honoured() {
        let temp = TempDir::new().unwrap();
        let pm = MockPackageManager::new();
        let mut ui = MockUI::new();
        let args = SyncArgs {
            dry_run: true,
            ..Default::default()
        };

        let result = command(&temp, args)
            .execute_with(&SyncConfig::default(), &pm, &mut ui)
            .unwrap();

        assert!(result.success);
        assert!(pm.provisions().is_empty());
    }

    #[test]
    fn resolve_config_applies_overrides_over_file() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("conda-sync.yml"),
            "env_name: from-file\nconda: mamba\n",
        )
        .unwrap();
        let base = BaseDirectory::resolve(temp.path(), None);
        let target = TargetArgs {
            env_name: Some("from-flag".into()),
            ..Default::default()
        };

        let config = resolve_config(&base, None, &target).unwrap();

        assert_eq!(config.env_name, "from-flag");
        assert_eq!(config.conda, "mamba");
    }

    #[test]
    fn missing_explicit_config_exits_two() {
        let temp = TempDir::new().unwrap();
        let cmd = SyncCommand::new(
            BaseDirectory::resolve(temp.path(), None),
            Some(PathBuf::from("missing.yml")),
            SyncArgs::default(),
        );
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result, CommandResult::failure(CONFIG_ERROR_EXIT));
        assert!(ui.has_error("Configuration not found"));
    }

    #[test]
    fn package_manager_uses_configured_executable() {
        let config = SyncConfig {
            conda: "micromamba".into(),
            ..Default::default()
        };
        let base = BaseDirectory::resolve(std::path::Path::new("/work"), None);
        assert_eq!(package_manager(&config, &base).executable(), "micromamba");
    }
}
