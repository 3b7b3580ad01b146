//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::config::ConfigOverrides;

/// conda-sync - Reconcile a conda environment with its requirements file.
#[derive(Debug, Parser)]
#[command(name = "conda-sync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to config file (overrides <project>/conda-sync.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory relative paths are resolved against (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Also show package manager stderr while it runs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output (hides package manager output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create or update the environment (default if no command specified)
    Sync(SyncArgs),

    /// Show how the environment differs from the requirements file
    Diff(DiffArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Which environment and requirements file to work on.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct TargetArgs {
    /// Conda environment name [default: ml]
    #[arg(short = 'n', long = "name", value_name = "ENV")]
    pub env_name: Option<String>,

    /// Requirements file [default: requirements.txt]
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Package manager executable [default: conda]
    #[arg(long, value_name = "EXE")]
    pub conda: Option<String>,
}

impl TargetArgs {
    /// Convert to config overrides.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            env_name: self.env_name.clone(),
            manifest: self.manifest.clone(),
            conda: self.conda.clone(),
        }
    }
}

/// Arguments for the `sync` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SyncArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Print the conda command instead of running it
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the `diff` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct DiffArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_parses() {
        let cli = Cli::parse_from(["conda-sync"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn sync_parses_target_and_dry_run() {
        let cli = Cli::parse_from([
            "conda-sync",
            "sync",
            "-n",
            "vision",
            "--file",
            "envs/vision.txt",
            "--conda",
            "mamba",
            "--dry-run",
        ]);

        let Some(Commands::Sync(args)) = cli.command else {
            panic!("Expected Sync command");
        };
        assert!(args.dry_run);
        assert_eq!(
            args.target.overrides(),
            ConfigOverrides {
                env_name: Some("vision".into()),
                manifest: Some(PathBuf::from("envs/vision.txt")),
                conda: Some("mamba".into()),
            }
        );
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::parse_from(["conda-sync", "diff", "--verbose", "-p", "/srv/ml"]);
        assert!(cli.verbose);
        assert_eq!(cli.project, Some(PathBuf::from("/srv/ml")));
        assert!(matches!(cli.command, Some(Commands::Diff(_))));
    }

    #[test]
    fn unset_target_has_no_overrides() {
        assert_eq!(TargetArgs::default().overrides(), ConfigOverrides::default());
    }
}
