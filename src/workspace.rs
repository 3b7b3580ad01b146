//! Base directory resolution.
//!
//! Relative paths (the requirements file, the config file) are resolved
//! against a base directory that is passed explicitly through the call
//! chain. The process working directory is never changed.

use std::path::{Path, PathBuf};

/// The directory conda-sync works from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseDirectory {
    cwd: PathBuf,
    base: PathBuf,
}

impl BaseDirectory {
    /// Resolve the base directory.
    ///
    /// An explicit directory wins; relative explicit paths are taken
    /// relative to `cwd`. Without one, the base is `cwd` itself.
    pub fn resolve(cwd: &Path, explicit: Option<&Path>) -> Self {
        let base = match explicit {
            Some(dir) if dir.is_absolute() => dir.to_path_buf(),
            Some(dir) => cwd.join(dir),
            None => cwd.to_path_buf(),
        };

        Self {
            cwd: cwd.to_path_buf(),
            base,
        }
    }

    /// Process working directory at startup.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Directory relative paths are resolved against.
    pub fn path(&self) -> &Path {
        &self.base
    }

    /// Resolve `path` against the base directory.
    pub fn join(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base.join(path)
        }
    }

    /// Diagnostic lines describing the resolution.
    pub fn describe(&self) -> Vec<String> {
        vec![
            format!("current working directory: {}", self.cwd.display()),
            format!("base directory: {}", self.base.display()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_cwd() {
        let dir = BaseDirectory::resolve(Path::new("/home/dev/project"), None);

        assert_eq!(dir.path(), Path::new("/home/dev/project"));
        assert_eq!(dir.describe().len(), 2);
    }

    #[test]
    fn absolute_explicit_dir_wins() {
        let dir = BaseDirectory::resolve(Path::new("/home/dev"), Some(Path::new("/srv/ml")));

        assert_eq!(dir.path(), Path::new("/srv/ml"));
        assert_eq!(
            dir.describe(),
            vec![
                "current working directory: /home/dev".to_string(),
                "base directory: /srv/ml".to_string()
            ]
        );
    }

    #[test]
    fn relative_explicit_dir_is_joined_to_cwd() {
        let dir = BaseDirectory::resolve(Path::new("/home/dev"), Some(Path::new("ml")));
        assert_eq!(dir.path(), Path::new("/home/dev/ml"));
    }

    #[test]
    fn join_resolves_relative_paths_only() {
        let dir = BaseDirectory::resolve(Path::new("/work"), None);

        assert_eq!(
            dir.join(Path::new("requirements.txt")),
            PathBuf::from("/work/requirements.txt")
        );
        assert_eq!(
            dir.join(Path::new("/etc/requirements.txt")),
            PathBuf::from("/etc/requirements.txt")
        );
    }
}
