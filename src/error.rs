//! Error types for conda-sync operations.
//!
//! This module defines [`SyncError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Read-only steps (listing environments, listing packages, reading the
//!   manifest) return `SyncError` and abort the run
//! - Provisioning steps report a non-zero exit through
//!   [`ProvisionOutcome`](crate::provision::ProvisionOutcome) instead
//! - Use `anyhow::Error` (via `SyncError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for conda-sync operations.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The package manager executable could not be spawned.
    #[error("Command not found: {command}")]
    CommandNotFound { command: String },

    /// A checked command exited with a non-zero status.
    #[error("Command failed with exit code {code:?}: {command}{}", format_stderr(.stderr))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Requirements manifest does not exist.
    #[error("Requirements file not found: {path}")]
    ManifestNotFound { path: PathBuf },

    /// Explicitly requested configuration file does not exist.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn format_stderr(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{}", trimmed)
    }
}

/// Result type alias for conda-sync operations.
pub type Result<T> = std::result::Result<T, SyncError>;
