//! Applying remediations.
//!
//! [`apply`] is the dispatch table from an [`IssueKind`] to the procedure
//! that fixes it; [`remediate`] walks the issue list and never stops early.

use serde::Serialize;

use super::report::Console;
use super::rules::{
    bundler, dependencies, dywo_config, ignore, lint, package, readme, sources, structure,
    transpiler,
};
use super::{Issue, IssueKind};
use crate::context::ServiceContext;
use crate::project::ProjectRoot;

/// Result of remediating one issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum Outcome {
    /// The remediation completed.
    Fixed,
    /// The remediation failed.
    Failed {
        /// Why it failed.
        reason: String,
    },
}

/// An issue's message paired with what happened when it was remediated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemediationOutcome {
    /// Rule that raised the issue.
    pub rule: &'static str,
    /// The issue's message.
    pub message: String,
    /// Fixed or failed.
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl RemediationOutcome {
    /// Returns `true` if the remediation completed.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.outcome == Outcome::Fixed
    }
}

/// Runs the remediation for `kind` against `root`.
///
/// Every remediation re-reads the file it touches, so applying one to an
/// already repaired project changes nothing.
///
/// # Errors
///
/// Returns an error string if a write fails or the installer fails.
pub fn apply(ctx: &ServiceContext, root: &ProjectRoot, kind: &IssueKind) -> Result<(), String> {
    match kind {
        IssueKind::MissingDirectory { path } => structure::create_directory(ctx, root, path),
        IssueKind::MissingFile { path } => structure::write_template(ctx, root, path),
        IssueKind::MissingConfig | IssueKind::InvalidConfig { .. } => {
            dywo_config::write_default(ctx, root)
        }
        IssueKind::MissingPackageManifest | IssueKind::IncompletePackageManifest { .. } => {
            package::repair_manifest(ctx, root)
        }
        IssueKind::MissingBundlerConfig | IssueKind::IncompleteBundlerConfig { .. } => {
            bundler::repair_bundler_config(ctx, root)
        }
        IssueKind::MissingBundlerLoader => bundler::write_bundler_loader(ctx, root),
        IssueKind::MissingTranspilerConfig | IssueKind::MissingTranspilerPresets { .. } => {
            transpiler::repair_transpiler_config(ctx, root)
        }
        IssueKind::MissingLintConfig | IssueKind::MissingLintExtends { .. } => {
            lint::repair_lint_config(ctx, root)
        }
        IssueKind::MissingIgnoreFile | IssueKind::MissingIgnoreEntries { .. } => {
            ignore::repair_ignore_file(ctx, root)
        }
        IssueKind::MissingReadme | IssueKind::MissingReadmeSections { .. } => {
            readme::repair_readme(ctx, root)
        }
        IssueKind::MissingDependencies { class, .. } => {
            dependencies::install_missing(ctx, root, *class)
        }
        IssueKind::NoSourceFiles => sources::scaffold_sources(ctx, root),
    }
}

/// Applies each issue's remediation in order and logs the result.
///
/// A failure is recorded and processing continues; nothing is rolled back.
pub fn remediate(
    ctx: &ServiceContext,
    root: &ProjectRoot,
    issues: &[Issue],
    console: &Console,
) -> Vec<RemediationOutcome> {
    issues
        .iter()
        .map(|issue| {
            let outcome = match apply(ctx, root, &issue.kind) {
                Ok(()) => {
                    console.success(&format!("Fixed: {}", issue.message));
                    Outcome::Fixed
                }
                Err(reason) => {
                    console.failure(&format!("Failed to fix: {} ({reason})", issue.message));
                    Outcome::Failed { reason }
                }
            };
            RemediationOutcome {
                rule: issue.rule,
                message: issue.message.clone(),
                outcome,
            }
        })
        .collect()
}
