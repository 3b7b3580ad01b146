//! conda-sync - Reconcile a conda environment with its requirements file.
//!
//! conda-sync checks whether a named conda environment exists, compares its
//! explicit package list with a requirements file, and then either creates
//! the environment or installs the requirements into it.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`conda`] - Package manager access and environment existence checks
//! - [`config`] - Configuration loading and command-line overrides
//! - [`error`] - Error types and result aliases
//! - [`packages`] - Installed and required package lists and their difference
//! - [`provision`] - Environment creation and installation
//! - [`shell`] - External command execution
//! - [`sync`] - Reconciliation orchestration
//! - [`ui`] - Terminal output
//! - [`workspace`] - Base directory resolution
//!
//! # Example
//!
//! ```
//! use conda_sync::packages::{compare_package_lists, Side};
//!
//! let installed = vec!["pkg-a=1.0".to_string(), "pkg-b=2.0".to_string()];
//! let required = vec!["pkg-a=1.0".to_string(), "pkg-c=3.0".to_string()];
//!
//! let diff = compare_package_lists(&installed, &required);
//! assert_eq!(diff.get("pkg-b=2.0"), Some(Side::Conda));
//! assert_eq!(diff.get("pkg-c=3.0"), Some(Side::Requirements));
//! ```

pub mod cli;
pub mod conda;
pub mod config;
pub mod error;
pub mod packages;
pub mod provision;
pub mod shell;
pub mod sync;
pub mod ui;
pub mod workspace;

pub use error::{Result, SyncError};
