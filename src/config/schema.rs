//! Configuration schema.
//!
//! Maps to the optional `conda-sync.yml` file:
//!
//! ```yaml
//! env_name: ml
//! manifest: requirements.txt
//! conda: mamba
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment name used when nothing else is configured.
pub const DEFAULT_ENV_NAME: &str = "ml";

/// Requirements file used when nothing else is configured.
pub const DEFAULT_MANIFEST: &str = "requirements.txt";

/// Root configuration for a sync run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Name of the conda environment to reconcile.
    pub env_name: String,

    /// Requirements file, relative to the base directory unless absolute.
    pub manifest: PathBuf,

    /// Package manager executable (`conda`, `mamba`, or a path).
    pub conda: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            env_name: DEFAULT_ENV_NAME.to_string(),
            manifest: PathBuf::from(DEFAULT_MANIFEST),
            conda: crate::conda::cli::DEFAULT_EXECUTABLE.to_string(),
        }
    }
}

/// Values given on the command line; each one replaces the file value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub env_name: Option<String>,
    pub manifest: Option<PathBuf>,
    pub conda: Option<String>,
}

impl SyncConfig {
    /// Apply command-line overrides.
    pub fn apply_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(name) = &overrides.env_name {
            self.env_name = name.clone();
        }
        if let Some(manifest) = &overrides.manifest {
            self.manifest = manifest.clone();
        }
        if let Some(conda) = &overrides.conda {
            self.conda = conda.clone();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = SyncConfig::default();
        assert_eq!(config.env_name, "ml");
        assert_eq!(config.manifest, PathBuf::from("requirements.txt"));
        assert_eq!(config.conda, "conda");
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config: SyncConfig = serde_yaml::from_str("env_name: vision").unwrap();
        assert_eq!(config.env_name, "vision");
        assert_eq!(config.manifest, PathBuf::from("requirements.txt"));
    }

    #[test]
    fn overrides_replace_only_given_values() {
        let config = SyncConfig::default().apply_overrides(&ConfigOverrides {
            conda: Some("mamba".into()),
            ..Default::default()
        });
        assert_eq!(config.conda, "mamba");
        assert_eq!(config.env_name, "ml");
    }

    #[test]
    fn serializes_round_trip_fields() {
        let yaml = serde_yaml::to_string(&SyncConfig::default()).unwrap();
        assert!(yaml.contains("env_name: ml"));
        assert!(yaml.contains("manifest: requirements.txt"));
    }
}
