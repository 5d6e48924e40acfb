//! The VCS ignore file, `.gitignore`.

use crate::context::ServiceContext;
use crate::project::ProjectRoot;
use crate::repair::{Issue, IssueKind, RepairPolicy, Rule};

/// Ignore file name, relative to the root.
pub const IGNORE_FILE: &str = ".gitignore";

/// Patterns the ignore file must contain.
pub const REQUIRED_ENTRIES: [&str; 4] = ["node_modules", "dist", ".env", ".env.local"];

/// Checks that `.gitignore` lists every required pattern.
pub struct IgnoreFileRule;

impl Rule for IgnoreFileRule {
    fn name(&self) -> &'static str {
        "ignore-file"
    }

    fn policy(&self) -> RepairPolicy {
        RepairPolicy::Merge
    }

    fn check(&self, ctx: &ServiceContext, root: &ProjectRoot) -> Vec<Issue> {
        let Ok(text) = ctx.fs.read_to_string(&root.join(IGNORE_FILE)) else {
            return vec![self.issue(
                IssueKind::MissingIgnoreFile,
                format!("Missing or unreadable {IGNORE_FILE} file"),
            )];
        };
        let entries = missing_entries(&text);
        if entries.is_empty() {
            return Vec::new();
        }
        let message = format!("{IGNORE_FILE} is missing entries: {}", entries.join(", "));
        let kind = IssueKind::MissingIgnoreEntries { entries };
        vec![self.issue(kind, message)]
    }
}

/// `/dist`, `dist/` and `dist` all ignore the same thing.
fn normalize(line: &str) -> &str {
    let line = line.trim();
    let line = line.strip_prefix('/').unwrap_or(line);
    line.strip_suffix('/').unwrap_or(line)
}

fn missing_entries(text: &str) -> Vec<String> {
    let present: Vec<&str> = text.lines().map(normalize).collect();
    REQUIRED_ENTRIES
        .iter()
        .filter(|entry| !present.contains(entry))
        .map(|entry| (*entry).to_string())
        .collect()
}

/// Creates `.gitignore`, or appends only the missing entries after the
/// existing lines.
///
/// # Errors
///
/// Returns an error string if the file cannot be written.
pub fn repair_ignore_file(ctx: &ServiceContext, root: &ProjectRoot) -> Result<(), String> {
    let path = root.join(IGNORE_FILE);
    let mut text = ctx.fs.read_to_string(&path).unwrap_or_default();
    let missing = missing_entries(&text);
    if missing.is_empty() {
        return Ok(());
    }

    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    for entry in missing {
        text.push_str(&entry);
        text.push('\n');
    }
    ctx.fs
        .write(&path, &text)
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))
}
