//! The transpiler configuration, `.babelrc`.

use serde_json::{json, Value};

use super::{read_json_object, write_json_object, JsonObject};
use crate::context::ServiceContext;
use crate::project::ProjectRoot;
use crate::repair::{Issue, IssueKind, RepairPolicy, Rule};

/// Transpiler config file name, relative to the root.
pub const TRANSPILER_FILE: &str = ".babelrc";

/// Presets the project must load.
pub const REQUIRED_PRESETS: [&str; 2] = ["@babel/preset-env", "@babel/preset-react"];

/// Checks that `.babelrc` lists every required preset.
pub struct TranspilerConfigRule;

impl Rule for TranspilerConfigRule {
    fn name(&self) -> &'static str {
        "transpiler-config"
    }

    fn policy(&self) -> RepairPolicy {
        RepairPolicy::Merge
    }

    fn check(&self, ctx: &ServiceContext, root: &ProjectRoot) -> Vec<Issue> {
        let Some(config) = read_json_object(ctx, &root.join(TRANSPILER_FILE)) else {
            return vec![self.issue(
                IssueKind::MissingTranspilerConfig,
                format!("Missing or unreadable {TRANSPILER_FILE}"),
            )];
        };
        let presets = missing_presets(&config);
        if presets.is_empty() {
            return Vec::new();
        }
        let message = format!(
            "{TRANSPILER_FILE} is missing presets: {}",
            presets.join(", ")
        );
        let kind = IssueKind::MissingTranspilerPresets { presets };
        vec![self.issue(kind, message)]
    }
}

/// Name of a preset entry, which is either `"name"` or `["name", {options}]`.
fn preset_name(entry: &Value) -> Option<&str> {
    match entry {
        Value::String(name) => Some(name),
        Value::Array(parts) => parts.first().and_then(Value::as_str),
        _ => None,
    }
}

fn missing_presets(config: &JsonObject) -> Vec<String> {
    let declared: Vec<&str> = match config.get("presets") {
        Some(Value::Array(entries)) => entries.iter().filter_map(preset_name).collect(),
        Some(Value::String(name)) => vec![name.as_str()],
        _ => Vec::new(),
    };
    REQUIRED_PRESETS
        .iter()
        .filter(|preset| !declared.contains(preset))
        .map(|preset| (*preset).to_string())
        .collect()
}

/// Creates `.babelrc`, or appends the missing presets to it.
///
/// A lone preset written as a string becomes the first entry of the array.
/// Any other non-array `presets` value is replaced.
///
/// # Errors
///
/// Returns an error string if the file cannot be written.
pub fn repair_transpiler_config(ctx: &ServiceContext, root: &ProjectRoot) -> Result<(), String> {
    let path = root.join(TRANSPILER_FILE);
    let mut config = read_json_object(ctx, &path).unwrap_or_default();
    let missing = missing_presets(&config);
    if missing.is_empty() {
        return Ok(());
    }

    let presets = config.entry("presets").or_insert_with(|| json!([]));
    match presets {
        Value::Array(_) => {}
        Value::String(name) => *presets = json!([name.clone()]),
        _ => *presets = json!([]),
    }
    if let Value::Array(entries) = presets {
        entries.extend(missing.into_iter().map(Value::String));
    }
    write_json_object(ctx, &path, &config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn setup(contents: Option<&str>) -> (tempfile::TempDir, ServiceContext, ProjectRoot) {
        let dir = tempfile::tempdir().unwrap();
        if let Some(text) = contents {
            std::fs::write(dir.path().join(TRANSPILER_FILE), text).unwrap();
        }
        let root = ProjectRoot::new(dir.path());
        (dir, ServiceContext::live(Settings::default()), root)
    }

    #[test]
    fn preset_with_options_counts() {
        let (_dir, ctx, root) = setup(Some(
            r#"{"presets": [
                ["@babel/preset-env", {"targets": "defaults"}],
                "@babel/preset-react"
            ]}"#,
        ));
        assert!(TranspilerConfigRule.check(&ctx, &root).is_empty());
    }

    #[test]
    fn string_presets_value_is_kept_as_first_entry() {
        let (dir, ctx, root) = setup(Some(r#"{"presets": "@babel/preset-env"}"#));
        let issues = TranspilerConfigRule.check(&ctx, &root);
        assert_eq!(
            issues[0].kind,
            IssueKind::MissingTranspilerPresets {
                presets: vec!["@babel/preset-react".into()]
            }
        );

        repair_transpiler_config(&ctx, &root).unwrap();
        let text = std::fs::read_to_string(dir.path().join(TRANSPILER_FILE)).unwrap();
        let config: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            config["presets"],
            json!(["@babel/preset-env", "@babel/preset-react"])
        );
        assert!(TranspilerConfigRule.check(&ctx, &root).is_empty());
    }

    #[test]
    fn appends_only_the_missing_preset() {
        let (dir, ctx, root) = setup(Some(
            r#"{"presets": [["@babel/preset-env", {"targets": "defaults"}]], "plugins": ["x"]}"#,
        ));
        let issues = TranspilerConfigRule.check(&ctx, &root);
        assert_eq!(
            issues[0].kind,
            IssueKind::MissingTranspilerPresets {
                presets: vec!["@babel/preset-react".into()]
            }
        );

        repair_transpiler_config(&ctx, &root).unwrap();
        let text = std::fs::read_to_string(dir.path().join(TRANSPILER_FILE)).unwrap();
        let config: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            config["presets"],
            json!([["@babel/preset-env", {"targets": "defaults"}], "@babel/preset-react"])
        );
        assert_eq!(config["plugins"], json!(["x"]));
    }

    #[test]
    fn creates_missing_file() {
        let (_dir, ctx, root) = setup(None);
        assert_eq!(
            TranspilerConfigRule.check(&ctx, &root)[0].kind,
            IssueKind::MissingTranspilerConfig
        );
        repair_transpiler_config(&ctx, &root).unwrap();
        assert!(TranspilerConfigRule.check(&ctx, &root).is_empty());
    }
}
