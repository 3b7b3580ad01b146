//! Tagged symmetric difference between two package lists.

use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Which list uniquely contains a package entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// Present in the installed environment only.
    Conda,
    /// Present in the requirements file only.
    Requirements,
}

impl Side {
    /// Tag printed next to a differing package.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Conda => "conda",
            Side::Requirements => "requirements",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Packages that appear on exactly one side, keyed by specifier.
///
/// Iteration is in sorted specifier order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageDiff {
    entries: BTreeMap<String, Side>,
}

impl PackageDiff {
    /// Whether both lists contain the same entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of differing entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Side that uniquely contains `package`, if it differs at all.
    pub fn get(&self, package: &str) -> Option<Side> {
        self.entries.get(package).copied()
    }

    /// Iterate over `(package, side)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Side)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    fn record(&mut self, package: &str, side: Side) {
        self.entries.insert(package.to_string(), side);
    }
}

/// Compare the installed package list against the manifest.
///
/// Every installed entry missing from the manifest is tagged
/// [`Side::Conda`]; every manifest entry missing from the environment is
/// tagged [`Side::Requirements`]. Entries on both sides are omitted.
/// Comparison is exact string equality; header lines from the package
/// manager are ordinary entries.
pub fn compare_package_lists(installed: &[String], manifest: &[String]) -> PackageDiff {
    let installed_set: HashSet<&str> = installed.iter().map(String::as_str).collect();
    let manifest_set: HashSet<&str> = manifest.iter().map(String::as_str).collect();

    let mut diff = PackageDiff::default();

    for package in installed {
        if !manifest_set.contains(package.as_str()) {
            diff.record(package, Side::Conda);
        }
    }

    // Written second, so a key recorded on both sides would end up here.
    // Exact membership makes that impossible.
    for package in manifest {
        if !installed_set.contains(package.as_str()) {
            diff.record(package, Side::Requirements);
        }
    }

    diff
}
