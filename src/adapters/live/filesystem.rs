//! Live filesystem adapter using `std::fs`.

use std::path::Path;

use crate::ports::filesystem::FileSystem;
use crate::ports::PortError;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::write(path, contents)?)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), PortError> {
        Ok(std::fs::create_dir_all(path)?)
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<String>, PortError> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            if let Some(name) = entry.file_name().to_str() {
                entries.push(name.to_string());
            }
        }
        entries.sort();
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("src/components/Navigation.js");

        LiveFileSystem.write(&path, "export default 1;\n").unwrap();

        assert!(LiveFileSystem.exists(&path));
        assert!(LiveFileSystem.is_dir(&dir.path().join("src/components")));
        let written = LiveFileSystem.read_to_string(&path).unwrap();
        assert_eq!(written, "export default 1;\n");
    }

    #[test]
    fn list_dir_is_sorted() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.js"), "").unwrap();
        std::fs::write(dir.path().join("a.js"), "").unwrap();
        std::fs::create_dir(dir.path().join("c")).unwrap();

        let entries = LiveFileSystem.list_dir(dir.path()).unwrap();
        assert_eq!(entries, vec!["a.js", "b.js", "c"]);
    }

    #[test]
    fn is_dir_false_for_files_and_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("README.md");
        std::fs::write(&file, "# x\n").unwrap();

        assert!(!LiveFileSystem.is_dir(&file));
        assert!(!LiveFileSystem.is_dir(&dir.path().join("missing")));
    }
}
