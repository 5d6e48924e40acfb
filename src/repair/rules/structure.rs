//! Required directories and files.

use std::path::Path;

use crate::context::ServiceContext;
use crate::project::ProjectRoot;
use crate::repair::{templates, Issue, IssueKind, RepairPolicy, Rule};

/// Directories every project needs.
pub const REQUIRED_DIRS: [&str; 4] = ["src", "public", "src/components", "src/pages"];

/// Files every project needs: entry module, root component, stylesheet,
/// HTML shell, one component and one page.
pub const REQUIRED_FILES: [&str; 6] = [
    "src/index.js",
    "src/App.js",
    "src/styles.css",
    "public/index.html",
    "src/components/Navigation.js",
    "src/pages/Home.js",
];

/// Flags each required path that is absent.
pub struct StructureRule;

impl Rule for StructureRule {
    fn name(&self) -> &'static str {
        "structure"
    }

    fn policy(&self) -> RepairPolicy {
        RepairPolicy::Create
    }

    fn check(&self, ctx: &ServiceContext, root: &ProjectRoot) -> Vec<Issue> {
        let mut issues = Vec::new();
        for dir in REQUIRED_DIRS {
            if !ctx.fs.is_dir(&root.join(dir)) {
                let kind = IssueKind::MissingDirectory {
                    path: dir.to_string(),
                };
                issues.push(self.issue(kind, format!("Missing directory: {dir}")));
            }
        }
        for file in REQUIRED_FILES {
            if !ctx.fs.exists(&root.join(file)) {
                let kind = IssueKind::MissingFile {
                    path: file.to_string(),
                };
                issues.push(self.issue(kind, format!("Missing file: {file}")));
            }
        }
        issues
    }
}

/// Creates `relative` (and its parents) under the root.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created.
pub fn create_directory(
    ctx: &ServiceContext,
    root: &ProjectRoot,
    relative: &str,
) -> Result<(), String> {
    ctx.fs
        .create_dir_all(&root.join(relative))
        .map_err(|e| format!("Failed to create directory {relative}: {e}"))
}

/// Writes the template for `relative`'s basename unless the file already
/// exists.
///
/// # Errors
///
/// Returns an error string if the file cannot be written.
pub fn write_template(
    ctx: &ServiceContext,
    root: &ProjectRoot,
    relative: &str,
) -> Result<(), String> {
    let path = root.join(relative);
    if ctx.fs.exists(&path) {
        return Ok(());
    }
    let basename = Path::new(relative)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();
    ctx.fs
        .write(&path, templates::for_basename(basename))
        .map_err(|e| format!("Failed to write {relative}: {e}"))
}
