//! The `package.json` manifest.

use serde_json::{json, Value};

use super::{fill_missing, lookup, object, read_json_object, write_json_object, JsonObject};
use crate::context::ServiceContext;
use crate::project::ProjectRoot;
use crate::repair::{Issue, IssueKind, RepairPolicy, Rule};

/// Manifest file name, relative to the root.
pub const MANIFEST_FILE: &str = "package.json";

const IDENTITY_FIELDS: [&str; 3] = ["name", "version", "description"];
const REQUIRED_SCRIPTS: [&str; 3] = ["start", "build", "dev"];

/// Default identity fields for a project named `name`.
fn default_identity(name: &str) -> JsonObject {
    object(json!({
        "name": name,
        "version": "1.0.0",
        "description": "A Dywo project",
    }))
}

fn default_scripts() -> JsonObject {
    object(json!({
        "start": "dywo dev",
        "build": "dywo build",
        "dev": "dywo dev",
    }))
}

/// A complete default manifest.
#[must_use]
pub fn default_manifest(name: &str) -> JsonObject {
    let mut manifest = default_identity(name);
    manifest.insert("scripts".to_string(), Value::Object(default_scripts()));
    manifest.insert("dependencies".to_string(), json!({}));
    manifest.insert("devDependencies".to_string(), json!({}));
    manifest
}

/// Checks the identity fields and the `start`/`build`/`dev` scripts.
pub struct PackageManifestRule;

impl Rule for PackageManifestRule {
    fn name(&self) -> &'static str {
        "package-manifest"
    }

    fn policy(&self) -> RepairPolicy {
        RepairPolicy::Merge
    }

    fn check(&self, ctx: &ServiceContext, root: &ProjectRoot) -> Vec<Issue> {
        let Some(manifest) = read_json_object(ctx, &root.join(MANIFEST_FILE)) else {
            return vec![self.issue(
                IssueKind::MissingPackageManifest,
                format!("Missing or unreadable {MANIFEST_FILE} file"),
            )];
        };

        let missing = missing_fields(&manifest);
        if missing.is_empty() {
            return Vec::new();
        }
        let names = missing.join(", ");
        let message = format!("Incomplete {MANIFEST_FILE}: missing {names}");
        let kind = IssueKind::IncompletePackageManifest { missing };
        vec![self.issue(kind, message)]
    }
}

fn missing_fields(manifest: &JsonObject) -> Vec<String> {
    IDENTITY_FIELDS
        .iter()
        .map(|f| (*f).to_string())
        .chain(REQUIRED_SCRIPTS.iter().map(|s| format!("scripts.{s}")))
        .filter(|path| lookup(manifest, path).is_none())
        .collect()
}

/// Brings `package.json` up to the required shape.
///
/// An existing manifest keeps every key it has; only absent identity
/// fields and scripts are added. A missing or unparsable manifest is
/// replaced with [`default_manifest`].
///
/// # Errors
///
/// Returns an error string if the file cannot be written.
pub fn repair_manifest(ctx: &ServiceContext, root: &ProjectRoot) -> Result<(), String> {
    let path = root.join(MANIFEST_FILE);
    let Some(mut manifest) = read_json_object(ctx, &path) else {
        return write_json_object(ctx, &path, &default_manifest(&root.package_name()));
    };
    if missing_fields(&manifest).is_empty() {
        return Ok(());
    }

    fill_missing(&mut manifest, &default_identity(&root.package_name()));
    match manifest.get_mut("scripts") {
        Some(Value::Object(scripts)) => {
            fill_missing(scripts, &default_scripts());
        }
        _ => {
            manifest.insert("scripts".to_string(), Value::Object(default_scripts()));
        }
    }
    write_json_object(ctx, &path, &manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn setup(contents: Option<&str>) -> (tempfile::TempDir, ServiceContext, ProjectRoot) {
        let dir = tempfile::tempdir().unwrap();
        if let Some(text) = contents {
            std::fs::write(dir.path().join(MANIFEST_FILE), text).unwrap();
        }
        let root = ProjectRoot::new(dir.path());
        (dir, ServiceContext::live(Settings::default()), root)
    }

    fn read(dir: &tempfile::TempDir) -> Value {
        let text = std::fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn missing_manifest_is_created_with_defaults() {
        let (dir, ctx, root) = setup(None);
        let issues = PackageManifestRule.check(&ctx, &root);
        assert_eq!(issues[0].kind, IssueKind::MissingPackageManifest);

        repair_manifest(&ctx, &root).unwrap();
        let manifest = read(&dir);
        assert_eq!(manifest["version"], "1.0.0");
        assert_eq!(manifest["scripts"]["start"], "dywo dev");
        assert_eq!(manifest["scripts"]["build"], "dywo build");
        assert_eq!(manifest["scripts"]["dev"], "dywo dev");
        assert_eq!(manifest["devDependencies"], json!({}));
        assert!(PackageManifestRule.check(&ctx, &root).is_empty());
    }

    #[test]
    fn incomplete_manifest_lists_missing_fields() {
        let manifest = r#"{"name": "shop", "scripts": {"start": "node server.js"}}"#;
        let (_dir, ctx, root) = setup(Some(manifest));
        let issues = PackageManifestRule.check(&ctx, &root);
        assert_eq!(
            issues[0].kind,
            IssueKind::IncompletePackageManifest {
                missing: vec![
                    "version".into(),
                    "description".into(),
                    "scripts.build".into(),
                    "scripts.dev".into()
                ]
            }
        );
    }

    #[test]
    fn merge_preserves_custom_fields_and_existing_scripts() {
        let custom = r#"{
            "name": "shop",
            "private": true,
            "scripts": {"start": "node server.js", "test": "jest"}
        }"#;
        let (dir, ctx, root) = setup(Some(custom));

        repair_manifest(&ctx, &root).unwrap();
        let manifest = read(&dir);

        assert_eq!(manifest["private"], true);
        assert_eq!(manifest["name"], "shop");
        assert_eq!(manifest["scripts"]["start"], "node server.js");
        assert_eq!(manifest["scripts"]["test"], "jest");
        assert_eq!(manifest["scripts"]["dev"], "dywo dev");
        let keys: Vec<&str> = manifest
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(&keys[..3], &["name", "private", "scripts"]);
    }

    #[test]
    fn repair_is_a_no_op_on_a_complete_manifest() {
        let original = "{\n  \"name\":\"shop\",\"version\":\"2.0.0\",\"description\":\"d\",\
                        \"scripts\":{\"start\":\"a\",\"build\":\"b\",\"dev\":\"c\"}}";
        let (dir, ctx, root) = setup(Some(original));

        repair_manifest(&ctx, &root).unwrap();
        let text = std::fs::read_to_string(dir.path().join(MANIFEST_FILE)).unwrap();
        assert_eq!(text, original);
    }

    #[test]
    fn non_object_scripts_are_replaced() {
        let (dir, ctx, root) = setup(Some(r#"{"scripts": "oops"}"#));
        repair_manifest(&ctx, &root).unwrap();
        assert_eq!(read(&dir)["scripts"]["build"], "dywo build");
    }
}
