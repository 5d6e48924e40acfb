//! Presence of application source files.

use std::path::Path;

use super::structure::write_template;
use crate::context::ServiceContext;
use crate::project::ProjectRoot;
use crate::repair::{Issue, IssueKind, RepairPolicy, Rule};

/// Directory searched for sources.
pub const SOURCE_DIR: &str = "src";

/// Files scaffolded when no source exists.
pub const SCAFFOLD_FILES: [&str; 2] = ["src/index.js", "src/App.js"];

const SOURCE_EXTENSIONS: [&str; 2] = ["js", "jsx"];

/// Checks that `src` holds at least one `.js` or `.jsx` file.
pub struct SourcePresenceRule;

impl Rule for SourcePresenceRule {
    fn name(&self) -> &'static str {
        "source-presence"
    }

    fn policy(&self) -> RepairPolicy {
        RepairPolicy::Create
    }

    fn check(&self, ctx: &ServiceContext, root: &ProjectRoot) -> Vec<Issue> {
        if contains_source(ctx, &root.join(SOURCE_DIR)) {
            return Vec::new();
        }
        vec![self.issue(
            IssueKind::NoSourceFiles,
            format!("No JavaScript source files found in {SOURCE_DIR}"),
        )]
    }
}

fn is_source(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Depth-first search; `node_modules` is skipped and unreadable
/// directories count as empty.
fn contains_source(ctx: &ServiceContext, dir: &Path) -> bool {
    let Ok(entries) = ctx.fs.list_dir(dir) else {
        return false;
    };
    entries.iter().any(|name| {
        let path = dir.join(name);
        if ctx.fs.is_dir(&path) {
            name != "node_modules" && contains_source(ctx, &path)
        } else {
            is_source(name)
        }
    })
}

/// Writes the entry module and root component, skipping either if present.
///
/// # Errors
///
/// Returns an error string if a file cannot be written.
pub fn scaffold_sources(ctx: &ServiceContext, root: &ProjectRoot) -> Result<(), String> {
    for rel in SCAFFOLD_FILES {
        write_template(ctx, root, rel)?;
    }
    Ok(())
}
