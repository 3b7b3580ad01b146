//! Package lists: what is installed, what is required, and how they differ.

pub mod diff;
pub mod manifest;

pub use diff::{compare_package_lists, PackageDiff, Side};
pub use manifest::{parse_manifest, read_manifest};

use crate::conda::PackageManager;
use crate::error::Result;

/// Fetch the installed package list of `env_name` in explicit format.
///
/// Header and comment lines from the package manager are kept verbatim.
pub fn installed_packages(pm: &dyn PackageManager, env_name: &str) -> Result<Vec<String>> {
    let output = pm.list_explicit(env_name)?;
    Ok(output.lines().map(str::to_string).collect())
}
