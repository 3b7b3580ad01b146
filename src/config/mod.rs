//! Configuration for a sync run.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! Precedence is command-line flag, then `conda-sync.yml`, then the
//! built-in defaults (`ml`, `requirements.txt`, `conda`).
//!
//! # Example
//!
//! ```
//! use conda_sync::config::{load_config, ConfigOverrides};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("conda-sync.yml"), "env_name: vision").unwrap();
//!
//! let config = load_config(temp.path(), None)
//!     .unwrap()
//!     .apply_overrides(&ConfigOverrides {
//!         conda: Some("mamba".to_string()),
//!         ..Default::default()
//!     });
//! assert_eq!(config.env_name, "vision");
//! assert_eq!(config.conda, "mamba");
//! ```

pub mod loader;
pub mod schema;

pub use loader::{find_config, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::{ConfigOverrides, SyncConfig, DEFAULT_ENV_NAME, DEFAULT_MANIFEST};
