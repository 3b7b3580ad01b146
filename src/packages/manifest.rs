//! Requirements file reading.

use crate::error::{Result, SyncError};
use std::fs;
use std::path::Path;

/// Read a requirements file into a list of trimmed lines.
///
/// Line order and count are preserved; blank lines become empty strings.
/// Nothing is parsed: each line is an opaque package specifier.
///
/// # Errors
///
/// Returns `ManifestNotFound` if the file doesn't exist and `Io` for any
/// other read failure.
pub fn read_manifest(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SyncError::ManifestNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SyncError::Io(e)
        }
    })?;

    Ok(parse_manifest(&content))
}

/// Split manifest text into trimmed lines.
pub fn parse_manifest(content: &str) -> Vec<String> {
    content.lines().map(|line| line.trim().to_string()).collect()
}
