//! The `.dywo` project configuration.

use serde_json::json;

use super::{lookup, object, read_json_object, write_json_object, JsonObject};
use crate::context::ServiceContext;
use crate::project::ProjectRoot;
use crate::repair::{Issue, IssueKind, RepairPolicy, Rule};

/// Config file name, relative to the root.
pub const CONFIG_FILE: &str = ".dywo";

const REQUIRED_TARGETS: [&str; 2] = ["client", "server"];
const REQUIRED_SCRIPTS: [&str; 3] = ["dev", "build", "start"];

/// The shape written on repair: both targets, their compile scripts and
/// the `dev`/`build`/`start` entry points.
#[must_use]
pub fn default_config() -> JsonObject {
    object(json!({
        "structure": {
            "client": { "src": "./src", "output": "./dist" },
            "server": { "src": "./server", "output": "./dist/server" }
        },
        "scripts": {
            "client:dev": "dywo compile client --mode development",
            "client:build": "dywo compile client --mode production",
            "server:dev": "dywo compile server --mode development",
            "server:build": "dywo compile server --mode production",
            "dev": "dywo dev",
            "build": "dywo build",
            "start": "dywo serve"
        }
    }))
}

/// Checks that `.dywo` names the client and server targets and the
/// `dev`/`build`/`start` scripts. Reports at most one issue, since every
/// violation is fixed by the same rewrite.
pub struct DywoConfigRule;

impl Rule for DywoConfigRule {
    fn name(&self) -> &'static str {
        "dywo-config"
    }

    fn policy(&self) -> RepairPolicy {
        RepairPolicy::Overwrite
    }

    fn check(&self, ctx: &ServiceContext, root: &ProjectRoot) -> Vec<Issue> {
        let Some(config) = read_json_object(ctx, &root.join(CONFIG_FILE)) else {
            return vec![self.issue(
                IssueKind::MissingConfig,
                format!("Missing or unreadable {CONFIG_FILE} configuration file"),
            )];
        };

        if let Some(reason) = structure_violation(&config) {
            return vec![self.issue(
                IssueKind::InvalidConfig {
                    reason: reason.clone(),
                },
                format!("Invalid {CONFIG_FILE} configuration structure: {reason}"),
            )];
        }

        let missing: Vec<String> = REQUIRED_SCRIPTS
            .iter()
            .map(|s| format!("scripts.{s}"))
            .filter(|path| lookup(&config, path).is_none())
            .collect();
        if missing.is_empty() {
            return Vec::new();
        }
        let reason = format!("missing {}", missing.join(", "));
        vec![self.issue(
            IssueKind::InvalidConfig {
                reason: reason.clone(),
            },
            format!("Incomplete {CONFIG_FILE} scripts: {reason}"),
        )]
    }
}

fn structure_violation(config: &JsonObject) -> Option<String> {
    for target in REQUIRED_TARGETS {
        let Some(entry) = lookup(config, &format!("structure.{target}")) else {
            return Some(format!("missing structure.{target}"));
        };
        let Some(entry) = entry.as_object() else {
            return Some(format!("structure.{target} is not an object"));
        };
        for field in ["src", "output"] {
            if !entry.get(field).is_some_and(serde_json::Value::is_string) {
                return Some(format!("structure.{target}.{field} is missing"));
            }
        }
    }
    None
}

/// Replaces `.dywo` with [`default_config`], discarding whatever was there.
///
/// # Errors
///
/// Returns an error string if the file cannot be written.
pub fn write_default(ctx: &ServiceContext, root: &ProjectRoot) -> Result<(), String> {
    write_json_object(ctx, &root.join(CONFIG_FILE), &default_config())
}
