//! The project root every rule and remediation works against.

use std::path::{Path, PathBuf};

use crate::ports::FileSystem;

/// A project directory under diagnosis.
///
/// Built once at the CLI boundary and passed explicitly to everything
/// below it; nothing in the repair engine reads the working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRoot {
    path: PathBuf,
}

impl ProjectRoot {
    /// Wraps a path without checking it.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolves `path` (or `cwd` when `None`) and checks it is a directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not an existing directory.
    pub fn resolve(
        path: Option<&Path>,
        cwd: &Path,
        fs: &dyn FileSystem,
    ) -> Result<Self, String> {
        let path = match path {
            Some(p) if p.is_absolute() => p.to_path_buf(),
            Some(p) => cwd.join(p),
            None => cwd.to_path_buf(),
        };
        if !fs.is_dir(&path) {
            return Err(format!(
                "Project root is not a directory: {}",
                path.display()
            ));
        }
        Ok(Self::new(std::fs::canonicalize(&path).unwrap_or(path)))
    }

    /// The root directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A path relative to the root.
    #[must_use]
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.path.join(relative)
    }

    /// A package name derived from the directory name: lowercase, with
    /// whitespace replaced by `-`. Falls back to `dywo-app`.
    #[must_use]
    pub fn package_name(&self) -> String {
        let name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
            .to_lowercase();
        if name.is_empty() {
            "dywo-app".to_string()
        } else {
            name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::live::LiveFileSystem;

    #[test]
    fn package_name_from_directory() {
        assert_eq!(ProjectRoot::new("/work/My Shop").package_name(), "my-shop");
        assert_eq!(ProjectRoot::new("/work/app").package_name(), "app");
        assert_eq!(ProjectRoot::new("/").package_name(), "dywo-app");
    }

    #[test]
    fn resolve_defaults_to_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let root = ProjectRoot::resolve(None, dir.path(), &LiveFileSystem).unwrap();
        assert_eq!(root.path(), std::fs::canonicalize(dir.path()).unwrap());
    }

    #[test]
    fn resolve_joins_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("app")).unwrap();
        let relative = Some(Path::new("app"));
        let root = ProjectRoot::resolve(relative, dir.path(), &LiveFileSystem).unwrap();
        assert!(root.path().ends_with("app"));
    }

    #[test]
    fn resolve_rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let relative = Some(Path::new("nope"));
        let err = ProjectRoot::resolve(relative, dir.path(), &LiveFileSystem).unwrap_err();
        assert!(err.contains("not a directory"));
    }
}
