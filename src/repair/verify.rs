//! Post-repair verification: bundle once, lint once, run each script once.

use serde::Serialize;
use serde_json::Value;

use super::report::Console;
use super::rules::bundler::BUNDLER_LOADER_FILE;
use super::rules::package::MANIFEST_FILE;
use super::rules::read_json_object;
use crate::context::ServiceContext;
use crate::project::ProjectRoot;

/// Result of a single verification command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckResult {
    /// Short label, e.g. `bundle` or `script: build`.
    pub name: String,
    /// The command line that ran.
    pub command: String,
    /// Whether it exited with code 0.
    pub passed: bool,
    /// Exit code, or the reason it could not run.
    pub detail: String,
}

/// The checks to run, as `(name, command)` pairs in execution order.
///
/// Scripts come from `package.json` in manifest order; an unreadable
/// manifest contributes none.
#[must_use]
pub fn plan_checks(ctx: &ServiceContext, root: &ProjectRoot) -> Vec<(String, String)> {
    let bundle = format!("npx webpack --config {BUNDLER_LOADER_FILE}");
    let mut checks = vec![
        ("bundle".to_string(), bundle),
        ("lint".to_string(), "npx eslint src".to_string()),
    ];
    let manifest = read_json_object(ctx, &root.join(MANIFEST_FILE)).unwrap_or_default();
    if let Some(scripts) = manifest.get("scripts").and_then(Value::as_object) {
        let pm = ctx.settings.package_manager;
        for script in scripts.keys() {
            let command = pm.run_script_command(script);
            checks.push((format!("script: {script}"), command));
        }
    }
    checks
}

/// Runs every planned check through the shell port in the project root.
///
/// Failures are reported, never retried.
pub fn verify(ctx: &ServiceContext, root: &ProjectRoot, console: &Console) -> Vec<CheckResult> {
    console.heading("Verifying project...");
    plan_checks(ctx, root)
        .into_iter()
        .map(|(name, command)| {
            let result = run_check(ctx, root, name, command);
            if result.passed {
                console.success(&format!("{}: passed", result.name));
            } else {
                console.failure(&format!("{}: failed ({})", result.name, result.detail));
            }
            result
        })
        .collect()
}

fn run_check(
    ctx: &ServiceContext,
    root: &ProjectRoot,
    name: String,
    command: String,
) -> CheckResult {
    match ctx.shell.run(&command, root.path()) {
        Ok(output) => {
            let passed = output.success();
            let detail = if passed {
                "exit code 0".to_string()
            } else {
                let tail = output.stderr.trim();
                if tail.is_empty() {
                    format!("exit code {}", output.exit_code)
                } else {
                    format!("exit code {}: {tail}", output.exit_code)
                }
            };
            CheckResult {
                name,
                command,
                passed,
                detail,
            }
        }
        Err(e) => CheckResult {
            name,
            command,
            passed: false,
            detail: format!("failed to run command: {e}"),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::config::{PackageManager, Settings};
    use crate::ports::{PortError, ShellExecutor, ShellOutput};
    use crate::repair::report::OutputFormat;

    struct ScriptedShell {
        ran: Arc<Mutex<Vec<String>>>,
    }

    impl ShellExecutor for ScriptedShell {
        fn run(&self, command: &str, _cwd: &Path) -> Result<ShellOutput, PortError> {
            self.ran.lock().unwrap().push(command.to_string());
            if command.contains("eslint") {
                return Err("eslint not found".into());
            }
            let exit_code = i32::from(command.ends_with("run start"));
            Ok(ShellOutput {
                exit_code,
                stdout: String::new(),
                stderr: String::new(),
            })
        }
    }

    #[test]
    fn runs_bundle_lint_then_scripts_in_manifest_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{"scripts": {"start": "dywo dev", "build": "dywo build", "dev": "dywo dev"}}"#,
        )
        .unwrap();
        let ran = Arc::new(Mutex::new(Vec::new()));
        let settings = Settings {
            package_manager: PackageManager::Pnpm,
            ..Settings::default()
        };
        let shell = ScriptedShell { ran: ran.clone() };
        let ctx = ServiceContext::live(settings).with_shell(Box::new(shell));
        let console = Console::new(OutputFormat::Json, true);

        let results = verify(&ctx, &ProjectRoot::new(dir.path()), &console);

        assert_eq!(
            *ran.lock().unwrap(),
            vec![
                "npx webpack --config webpack.config.js",
                "npx eslint src",
                "pnpm run start",
                "pnpm run build",
                "pnpm run dev",
            ]
        );
        let passed: Vec<bool> = results.iter().map(|r| r.passed).collect();
        assert_eq!(passed, vec![true, false, false, true, true]);
        assert!(results[1].detail.contains("eslint not found"));
        assert_eq!(results[2].detail, "exit code 1");
    }

    #[test]
    fn script_names_cannot_inject_shell_commands() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"{"scripts": {"build; touch PWNED": "x", "client:dev": "y"}}"#,
        )
        .unwrap();
        let ctx = ServiceContext::live(Settings::default());

        let checks = plan_checks(&ctx, &ProjectRoot::new(dir.path()));
        assert_eq!(
            checks[2],
            (
                "script: build; touch PWNED".to_string(),
                "npm run 'build; touch PWNED'".to_string()
            )
        );
        assert_eq!(checks[3].1, "npm run client:dev");
    }

    #[test]
    fn missing_manifest_plans_only_tool_checks() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ServiceContext::live(Settings::default());
        let names: Vec<String> = plan_checks(&ctx, &ProjectRoot::new(dir.path()))
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(names, vec!["bundle", "lint"]);
    }
}
