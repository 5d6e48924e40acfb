//! The bundler configuration, `webpack.config.json`, and the
//! `webpack.config.js` loader webpack actually reads.
//!
//! JSON cannot hold regular expressions and webpack wants an absolute output
//! path, so the loader turns string `test`/`include`/`exclude` conditions into
//! `RegExp`s and resolves `output.path` against the project root.

use serde_json::json;

use super::{fill_missing, object, read_json_object, write_json_object, JsonObject};
use crate::context::ServiceContext;
use crate::project::ProjectRoot;
use crate::repair::templates::BUNDLER_LOADER_JS;
use crate::repair::{Issue, IssueKind, RepairPolicy, Rule};

/// Bundler config file name, relative to the root.
pub const BUNDLER_FILE: &str = "webpack.config.json";

/// Loader passed to `webpack --config`, relative to the root.
pub const BUNDLER_LOADER_FILE: &str = "webpack.config.js";

/// Default bundler configuration. Its top-level keys are the required ones.
///
/// Rule conditions are regular expression sources; `output.path` is
/// relative to the root.
#[must_use]
pub fn default_bundler_config() -> JsonObject {
    object(json!({
        "entry": "./src/index.js",
        "output": {
            "path": "dist",
            "filename": "bundle.js",
            "publicPath": "/"
        },
        "module": {
            "rules": [
                { "test": "\\.(js|jsx)$", "exclude": "node_modules", "use": "babel-loader" },
                { "test": "\\.css$", "use": ["style-loader", "css-loader"] }
            ]
        },
        "plugins": []
    }))
}

/// Checks that the bundler config exposes `entry`, `output`, `module` and
/// `plugins`, and that the loader exists.
pub struct BundlerConfigRule;

impl Rule for BundlerConfigRule {
    fn name(&self) -> &'static str {
        "bundler-config"
    }

    fn policy(&self) -> RepairPolicy {
        RepairPolicy::Merge
    }

    fn check(&self, ctx: &ServiceContext, root: &ProjectRoot) -> Vec<Issue> {
        let mut issues = Vec::new();
        match read_json_object(ctx, &root.join(BUNDLER_FILE)) {
            None => issues.push(self.issue(
                IssueKind::MissingBundlerConfig,
                format!("Missing or unreadable {BUNDLER_FILE}"),
            )),
            Some(config) => {
                let missing: Vec<String> = default_bundler_config()
                    .keys()
                    .filter(|key| config.get(*key).map_or(true, serde_json::Value::is_null))
                    .cloned()
                    .collect();
                if !missing.is_empty() {
                    let message =
                        format!("Incomplete {BUNDLER_FILE}: missing {}", missing.join(", "));
                    let kind = IssueKind::IncompleteBundlerConfig { missing };
                    issues.push(self.issue(kind, message));
                }
            }
        }
        if !ctx.fs.exists(&root.join(BUNDLER_LOADER_FILE)) {
            issues.push(self.issue(
                IssueKind::MissingBundlerLoader,
                format!("Missing {BUNDLER_LOADER_FILE} loader for {BUNDLER_FILE}"),
            ));
        }
        issues
    }
}

/// Creates the bundler config, or adds only its missing top-level keys.
///
/// # Errors
///
/// Returns an error string if the file cannot be written.
pub fn repair_bundler_config(ctx: &ServiceContext, root: &ProjectRoot) -> Result<(), String> {
    let path = root.join(BUNDLER_FILE);
    let Some(mut config) = read_json_object(ctx, &path) else {
        return write_json_object(ctx, &path, &default_bundler_config());
    };
    if fill_missing(&mut config, &default_bundler_config()).is_empty() {
        return Ok(());
    }
    write_json_object(ctx, &path, &config)
}

/// Writes the loader unless a `webpack.config.js` already exists.
///
/// # Errors
///
/// Returns an error string if the file cannot be written.
pub fn write_bundler_loader(ctx: &ServiceContext, root: &ProjectRoot) -> Result<(), String> {
    let path = root.join(BUNDLER_LOADER_FILE);
    if ctx.fs.exists(&path) {
        return Ok(());
    }
    ctx.fs
        .write(&path, BUNDLER_LOADER_JS)
        .map_err(|e| format!("Failed to write {}: {e}", path.display()))
}
