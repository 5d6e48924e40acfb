//! The lint configuration, `.eslintrc.json`.

use serde_json::{json, Value};

use super::{object, read_json_object, write_json_object, JsonObject};
use crate::context::ServiceContext;
use crate::project::ProjectRoot;
use crate::repair::{Issue, IssueKind, RepairPolicy, Rule};

/// Lint config file name, relative to the root.
pub const LINT_FILE: &str = ".eslintrc.json";

/// Rule sets the project must extend.
pub const REQUIRED_EXTENDS: [&str; 2] = ["eslint:recommended", "plugin:react/recommended"];

fn default_lint_config() -> JsonObject {
    object(json!({
        "env": { "browser": true, "es2021": true },
        "extends": REQUIRED_EXTENDS,
        "plugins": ["react"],
        "parserOptions": {
            "ecmaVersion": 2021,
            "sourceType": "module",
            "ecmaFeatures": { "jsx": true }
        },
        "settings": { "react": { "version": "detect" } }
    }))
}

/// Checks that `.eslintrc.json` extends every required rule set.
pub struct LintConfigRule;

impl Rule for LintConfigRule {
    fn name(&self) -> &'static str {
        "lint-config"
    }

    fn policy(&self) -> RepairPolicy {
        RepairPolicy::Merge
    }

    fn check(&self, ctx: &ServiceContext, root: &ProjectRoot) -> Vec<Issue> {
        let Some(config) = read_json_object(ctx, &root.join(LINT_FILE)) else {
            return vec![self.issue(
                IssueKind::MissingLintConfig,
                format!("Missing or unreadable {LINT_FILE}"),
            )];
        };
        let extends = missing_extends(&config);
        if extends.is_empty() {
            return Vec::new();
        }
        let message = format!("{LINT_FILE} does not extend: {}", extends.join(", "));
        let kind = IssueKind::MissingLintExtends { extends };
        vec![self.issue(kind, message)]
    }
}

/// `extends` may be a single string or an array of strings.
fn declared_extends(config: &JsonObject) -> Vec<String> {
    match config.get("extends") {
        Some(Value::String(single)) => vec![single.clone()],
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn missing_extends(config: &JsonObject) -> Vec<String> {
    let declared = declared_extends(config);
    REQUIRED_EXTENDS
        .iter()
        .filter(|required| !declared.iter().any(|d| d == *required))
        .map(|required| (*required).to_string())
        .collect()
}

/// Creates `.eslintrc.json`, or appends the missing `extends` entries,
/// turning a single-string `extends` into an array.
///
/// # Errors
///
/// Returns an error string if the file cannot be written.
pub fn repair_lint_config(ctx: &ServiceContext, root: &ProjectRoot) -> Result<(), String> {
    let path = root.join(LINT_FILE);
    let Some(mut config) = read_json_object(ctx, &path) else {
        return write_json_object(ctx, &path, &default_lint_config());
    };
    let missing = missing_extends(&config);
    if missing.is_empty() {
        return Ok(());
    }

    let mut extends: Vec<Value> = match config.get("extends") {
        Some(Value::Array(entries)) => entries.clone(),
        Some(Value::String(single)) => vec![Value::String(single.clone())],
        _ => Vec::new(),
    };
    extends.extend(missing.into_iter().map(Value::String));
    config.insert("extends".to_string(), Value::Array(extends));
    write_json_object(ctx, &path, &config)
}
