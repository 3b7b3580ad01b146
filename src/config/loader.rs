//! Configuration file discovery and loading.

use crate::config::schema::SyncConfig;
use crate::error::{Result, SyncError};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in the base directory.
pub const CONFIG_FILE_NAME: &str = "conda-sync.yml";

/// Find the config file for `base_dir`, if one exists.
pub fn find_config(base_dir: &Path) -> Option<PathBuf> {
    let path = base_dir.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load configuration for a run.
///
/// An explicit path must exist. Otherwise `conda-sync.yml` in `base_dir`
/// is used when present, and defaults when it is not.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the explicit file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config(base_dir: &Path, explicit: Option<&Path>) -> Result<SyncConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_config(base_dir),
    };

    match path {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)
        }
        None => {
            tracing::debug!("No {} in {}, using defaults", CONFIG_FILE_NAME, base_dir.display());
            Ok(SyncConfig::default())
        }
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<SyncConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SyncError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SyncError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`SyncConfig`].
///
/// Empty content yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<SyncConfig> {
    if content.trim().is_empty() {
        return Ok(SyncConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| SyncError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
