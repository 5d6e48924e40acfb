//! Required npm packages.

use serde_json::Value;

use super::package::MANIFEST_FILE;
use super::{read_json_object, JsonObject};
use crate::context::ServiceContext;
use crate::project::ProjectRoot;
use crate::repair::{DependencyClass, Issue, IssueKind, RepairPolicy, Rule};

/// Packages the application needs at runtime, with the ranges installed.
///
/// The ranges match the generated sources: `ReactDOM.render` and the
/// `Switch` router API.
pub const RUNTIME_DEPENDENCIES: [(&str, &str); 3] = [
    ("react", "^17.0.2"),
    ("react-dom", "^17.0.2"),
    ("react-router-dom", "^5.2.0"),
];

/// Packages the toolchain needs, with the ranges installed.
///
/// `eslint` stays on 7.x so the generated `.eslintrc.json` is honored.
pub const DEVELOPMENT_DEPENDENCIES: [(&str, &str); 12] = [
    ("webpack", "^5.38.1"),
    ("webpack-cli", "^4.7.0"),
    ("webpack-dev-server", "^3.11.2"),
    ("html-webpack-plugin", "^5.3.1"),
    ("babel-loader", "^8.2.2"),
    ("@babel/core", "^7.14.3"),
    ("@babel/preset-env", "^7.14.2"),
    ("@babel/preset-react", "^7.13.13"),
    ("css-loader", "^5.2.6"),
    ("style-loader", "^2.0.0"),
    ("eslint", "^7.27.0"),
    ("eslint-plugin-react", "^7.24.0"),
];

/// The required `(name, range)` list for a class.
#[must_use]
pub fn required(class: DependencyClass) -> &'static [(&'static str, &'static str)] {
    match class {
        DependencyClass::Runtime => &RUNTIME_DEPENDENCIES,
        DependencyClass::Development => &DEVELOPMENT_DEPENDENCIES,
    }
}

/// Checks that `package.json` declares every required package.
///
/// A package counts as declared under either section, so a library moved to
/// `devDependencies` on purpose is not reinstalled.
pub struct DependencyRule;

impl Rule for DependencyRule {
    fn name(&self) -> &'static str {
        "dependencies"
    }

    fn policy(&self) -> RepairPolicy {
        RepairPolicy::Install
    }

    fn check(&self, ctx: &ServiceContext, root: &ProjectRoot) -> Vec<Issue> {
        let manifest = read_json_object(ctx, &root.join(MANIFEST_FILE)).unwrap_or_default();
        [DependencyClass::Runtime, DependencyClass::Development]
            .into_iter()
            .filter_map(|class| {
                let packages = missing_packages(&manifest, class);
                if packages.is_empty() {
                    return None;
                }
                let message = format!("Missing {class} dependencies: {}", packages.join(", "));
                let kind = IssueKind::MissingDependencies { class, packages };
                Some(self.issue(kind, message))
            })
            .collect()
    }
}

fn declared(manifest: &JsonObject, name: &str) -> bool {
    ["dependencies", "devDependencies"].iter().any(|section| {
        manifest
            .get(*section)
            .and_then(Value::as_object)
            .is_some_and(|deps| deps.contains_key(name))
    })
}

fn missing_packages(manifest: &JsonObject, class: DependencyClass) -> Vec<String> {
    required(class)
        .iter()
        .filter(|(name, _)| !declared(manifest, name))
        .map(|(name, _)| (*name).to_string())
        .collect()
}

/// `name@range` for a required package, or the bare name if it is unknown.
fn install_spec(class: DependencyClass, name: &str) -> String {
    match required(class).iter().find(|(known, _)| *known == name) {
        Some((_, range)) => format!("{name}@{range}"),
        None => name.to_string(),
    }
}

/// Installs the packages of `class` that are still undeclared, with one
/// installer invocation in the project root. Each package is pinned to its
/// required range.
///
/// # Errors
///
/// Returns an error string if the installer cannot be started or exits
/// non-zero.
pub fn install_missing(
    ctx: &ServiceContext,
    root: &ProjectRoot,
    class: DependencyClass,
) -> Result<(), String> {
    let manifest = read_json_object(ctx, &root.join(MANIFEST_FILE)).unwrap_or_default();
    let specs: Vec<String> = missing_packages(&manifest, class)
        .iter()
        .map(|name| install_spec(class, name))
        .collect();
    if specs.is_empty() {
        return Ok(());
    }

    let command = ctx.settings.package_manager.install_command(class, &specs);
    let output = ctx
        .shell
        .run(&command, root.path())
        .map_err(|e| format!("Failed to run `{command}`: {e}"))?;
    if output.success() {
        return Ok(());
    }
    let detail = output
        .stderr
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("")
        .trim();
    let code = output.exit_code;
    Err(format!("`{command}` exited with code {code}: {detail}"))
}
