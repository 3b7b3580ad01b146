//! Environment existence check.

use crate::error::Result;

use super::PackageManager;

/// Whether `env_name` appears as a whitespace-delimited token in `listing`.
///
/// A name that is only part of a longer token (a path, or a longer
/// environment name) does not count.
pub fn environment_exists(listing: &str, env_name: &str) -> bool {
    listing.split_whitespace().any(|token| token == env_name)
}

/// Ask the package manager whether `env_name` exists.
pub fn check_environment(pm: &dyn PackageManager, env_name: &str) -> Result<bool> {
    let listing = pm.list_environments()?;
    let exists = environment_exists(&listing, env_name);
    tracing::debug!("Environment '{}' exists: {}", env_name, exists);
    Ok(exists)
}
