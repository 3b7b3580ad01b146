//! Diff command implementation.
//!
//! The `conda-sync diff` command compares the environment with the
//! requirements file without changing anything. It exits 0 when they
//! match and 1 when they differ or the environment does not exist.

use std::path::PathBuf;

use crate::cli::args::DiffArgs;
use crate::conda::PackageManager;
use crate::config::SyncConfig;
use crate::error::Result;
use crate::sync::Reconciler;
use crate::ui::UserInterface;
use crate::workspace::BaseDirectory;

use super::dispatcher::{Command, CommandResult};
use super::sync::{config_failure, package_manager, resolve_config};

/// The diff command implementation.
pub struct DiffCommand {
    base: BaseDirectory,
    config_path: Option<PathBuf>,
    args: DiffArgs,
}

impl DiffCommand {
    /// Create a new diff command.
    pub fn new(base: BaseDirectory, config_path: Option<PathBuf>, args: DiffArgs) -> Self {
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
        match Reconciler::new(config, &self.base, pm).diff(ui)? {
            None => {
                ui.warning(&format!(
                    "The conda environment ({}) does not exist.",
                    config.env_name
                ));
                Ok(CommandResult::failure(1))
            }
            Some(diff) if diff.is_empty() => {
                ui.success(&format!(
                    "The conda environment ({}) packages and the requirements file are identical.",
                    config.env_name
                ));
                Ok(CommandResult::success())
            }
            Some(diff) => {
                ui.message(&format!("{} package(s) differ.", diff.len()));
                Ok(CommandResult::failure(1))
            }
        }
    }
}

impl Command for DiffCommand {
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
