//! Project diagnosis and repair.
//!
//! A fixed registry of [`Rule`]s inspects a [`ProjectRoot`]; [`collect`]
//! concatenates their [`Issue`]s in registry order. Each issue carries a
//! tagged [`IssueKind`] holding what its remediation needs, and
//! [`remedy::apply`] maps a kind to the procedure that fixes it.

pub mod remedy;
pub mod report;
pub mod rules;
pub mod templates;
pub mod verify;

use std::fmt;

use serde::Serialize;

use crate::context::ServiceContext;
use crate::project::ProjectRoot;

/// How a rule repairs what it finds.
///
/// `.dywo` is overwritten wholesale while the other structured files are
/// merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepairPolicy {
    /// Create missing paths from templates.
    Create,
    /// Replace the whole file with a default, discarding prior content.
    Overwrite,
    /// Fill in only the missing pieces, preserving everything else.
    Merge,
    /// Invoke the package installer.
    Install,
}

impl fmt::Display for RepairPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Overwrite => "overwrite",
            Self::Merge => "merge",
            Self::Install => "install",
        })
    }
}

/// Which `package.json` section a dependency belongs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyClass {
    /// `dependencies`.
    Runtime,
    /// `devDependencies`.
    Development,
}

impl DependencyClass {
    /// The manifest key holding this class.
    #[must_use]
    pub fn manifest_key(self) -> &'static str {
        match self {
            Self::Runtime => "dependencies",
            Self::Development => "devDependencies",
        }
    }
}

impl fmt::Display for DependencyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Runtime => "runtime",
            Self::Development => "development",
        })
    }
}

/// What is wrong, with the data needed to fix it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum IssueKind {
    /// A required directory is absent.
    MissingDirectory {
        /// Path relative to the root.
        path: String,
    },
    /// A required file is absent.
    MissingFile {
        /// Path relative to the root.
        path: String,
    },
    /// `.dywo` is absent, unreadable or not a JSON object.
    MissingConfig,
    /// `.dywo` parses but lacks a required target or script.
    InvalidConfig {
        /// First violation found.
        reason: String,
    },
    /// `package.json` is absent, unreadable or not a JSON object.
    MissingPackageManifest,
    /// `package.json` lacks identity fields or scripts.
    IncompletePackageManifest {
        /// Dotted field paths, e.g. `scripts.dev`.
        missing: Vec<String>,
    },
    /// `webpack.config.json` is absent or unreadable.
    MissingBundlerConfig,
    /// `webpack.config.json` lacks top-level keys.
    IncompleteBundlerConfig {
        /// Missing keys.
        missing: Vec<String>,
    },
    /// `webpack.config.js` is absent, so webpack cannot load the JSON config.
    MissingBundlerLoader,
    /// `.babelrc` is absent or unreadable.
    MissingTranspilerConfig,
    /// `.babelrc` lacks required presets.
    MissingTranspilerPresets {
        /// Missing preset names.
        presets: Vec<String>,
    },
    /// `.eslintrc.json` is absent or unreadable.
    MissingLintConfig,
    /// `.eslintrc.json` does not extend the required configs.
    MissingLintExtends {
        /// Missing `extends` entries.
        extends: Vec<String>,
    },
    /// `.gitignore` is absent or unreadable.
    MissingIgnoreFile,
    /// `.gitignore` lacks required patterns.
    MissingIgnoreEntries {
        /// Missing patterns.
        entries: Vec<String>,
    },
    /// `README.md` is absent or unreadable.
    MissingReadme,
    /// `README.md` lacks required section headers.
    MissingReadmeSections {
        /// Missing headers.
        sections: Vec<String>,
    },
    /// Required packages are not declared in `package.json`.
    MissingDependencies {
        /// Section they belong in.
        class: DependencyClass,
        /// Package names.
        packages: Vec<String>,
    },
    /// `src` holds no `.js`/`.jsx` files.
    NoSourceFiles,
}

/// A detected deviation from the expected project shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Name of the rule that raised it.
    pub rule: &'static str,
    /// That rule's repair policy.
    pub policy: RepairPolicy,
    /// What is wrong.
    #[serde(flatten)]
    pub kind: IssueKind,
    /// Plain-language description.
    pub message: String,
}

/// An independent check over a project root.
pub trait Rule {
    /// Stable rule name used in reports.
    fn name(&self) -> &'static str;

    /// How this rule's issues are repaired.
    fn policy(&self) -> RepairPolicy;

    /// Inspects `root` and returns zero or more issues. Never fails: an
    /// unreadable file is itself an issue.
    fn check(&self, ctx: &ServiceContext, root: &ProjectRoot) -> Vec<Issue>;

    /// Builds an issue attributed to this rule.
    fn issue(&self, kind: IssueKind, message: String) -> Issue {
        Issue {
            rule: self.name(),
            policy: self.policy(),
            kind,
            message,
        }
    }
}

/// The rules, in the order their issues are reported and fixed.
#[must_use]
pub fn registry() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(rules::structure::StructureRule),
        Box::new(rules::dywo_config::DywoConfigRule),
        Box::new(rules::package::PackageManifestRule),
        Box::new(rules::bundler::BundlerConfigRule),
        Box::new(rules::transpiler::TranspilerConfigRule),
        Box::new(rules::lint::LintConfigRule),
        Box::new(rules::ignore::IgnoreFileRule),
        Box::new(rules::readme::DocumentationRule),
        Box::new(rules::dependencies::DependencyRule),
        Box::new(rules::sources::SourcePresenceRule),
    ]
}

/// Runs every registered rule against `root` and concatenates the results.
///
/// An empty result means the project is compliant.
#[must_use]
pub fn collect(ctx: &ServiceContext, root: &ProjectRoot) -> Vec<Issue> {
    collect_with(&registry(), ctx, root)
}

/// Runs `rules` in order against `root`.
#[must_use]
pub fn collect_with(
    rules: &[Box<dyn Rule>],
    ctx: &ServiceContext,
    root: &ProjectRoot,
) -> Vec<Issue> {
    rules
        .iter()
        .flat_map(|rule| rule.check(ctx, root))
        .collect()
}
