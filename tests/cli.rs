//! Integration tests for top-level CLI behavior.

use std::path::Path;
use std::process::{Command, Output};

use chrono::Utc;
use serde_json::{json, Value};

use dywo::cassette::format::{Cassette, Interaction};

const COMPLETE_MANIFEST: &str = r#"{
  "name": "fixture",
  "dependencies": {"react": "^18.2.0", "react-dom": "^18.2.0", "react-router-dom": "^5.3.4"},
  "devDependencies": {
    "webpack": "^5.0.0", "webpack-cli": "^5.0.0", "webpack-dev-server": "^4.0.0",
    "html-webpack-plugin": "^5.0.0", "babel-loader": "^9.0.0", "@babel/core": "^7.0.0",
    "@babel/preset-env": "^7.0.0", "@babel/preset-react": "^7.0.0", "css-loader": "^6.0.0",
    "style-loader": "^3.0.0", "eslint": "^8.0.0", "eslint-plugin-react": "^7.0.0"
  }
}"#;

/// Runs the binary inside `cwd` with a scrubbed, non-interactive environment.
fn run_dywo(cwd: &Path, args: &[&str], env: &[(&str, &str)]) -> Output {
    let bin = env!("CARGO_BIN_EXE_dywo");
    let mut cmd = Command::new(bin);
    cmd.current_dir(cwd)
        .args(args)
        .env("DYWO_NONINTERACTIVE", "1")
        .env_remove("DYWO_RECORD")
        .env_remove("DYWO_REPLAY")
        .env_remove("DYWO_PACKAGE_MANAGER");
    for (key, value) in env {
        cmd.env(key, value);
    }
    cmd.output().expect("failed to run dywo binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn exit_code(output: &Output) -> i32 {
    output.status.code().expect("dywo was killed by a signal")
}

#[test]
fn help_lists_repair_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_dywo(dir.path(), &["--help"], &[]);
    assert_eq!(exit_code(&output), 0);
    assert!(stdout(&output).contains("repair"));
}

#[test]
fn repair_help_shows_flags() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_dywo(dir.path(), &["repair", "--help"], &[]);
    let text = stdout(&output);
    assert_eq!(exit_code(&output), 0);
    for flag in ["--fix", "--verify", "--root", "--format", "--no-color"] {
        assert!(text.contains(flag), "help is missing {flag}");
    }
}

#[test]
fn invalid_subcommand_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_dywo(dir.path(), &["nonsense"], &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(exit_code(&output), 2);
    assert!(stderr.contains("unrecognized subcommand"));
}

#[test]
fn empty_project_without_fix_lists_issues_and_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_dywo(dir.path(), &["repair", "--no-color"], &[]);
    let text = stdout(&output);

    assert_eq!(exit_code(&output), 1);
    assert!(text.contains("1. Missing directory: src"));
    assert!(text.contains("Missing or unreadable .dywo configuration file"));
    let decline = "No changes made. Run `dywo repair --fix` to automatically fix issues.";
    assert!(text.contains(decline));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn fix_builds_the_default_project() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("package.json"), COMPLETE_MANIFEST).unwrap();

    let output = run_dywo(dir.path(), &["repair", "--fix", "--no-color"], &[]);
    let text = stdout(&output);
    assert_eq!(exit_code(&output), 0, "{text}");
    assert!(text.contains("✓ Fixed: Missing directory: src"));

    let raw = std::fs::read_to_string(dir.path().join(".dywo")).unwrap();
    let config: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(config["structure"]["client"]["src"], "./src");
    assert_eq!(config["structure"]["server"]["output"], "./dist/server");
    assert_eq!(config["scripts"]["build"], "dywo build");

    let raw = std::fs::read_to_string(dir.path().join("package.json")).unwrap();
    let manifest: Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(manifest["name"], "fixture");
    for script in ["start", "build", "dev"] {
        assert!(manifest["scripts"][script].is_string(), "scripts.{script} missing");
    }
    let index = std::fs::read_to_string(dir.path().join("src/index.js")).unwrap();
    assert!(index.contains("ReactDOM"));

    let again = run_dywo(dir.path(), &["repair", "--no-color"], &[]);
    assert_eq!(exit_code(&again), 0);
    assert!(stdout(&again).contains("No issues found"));
}

#[test]
fn json_summary_is_the_only_stdout() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("package.json"), COMPLETE_MANIFEST).unwrap();

    let output = run_dywo(dir.path(), &["repair", "--fix", "--format", "json"], &[]);
    let summary: Value = serde_json::from_str(&stdout(&output)).unwrap();

    assert_eq!(exit_code(&output), 0);
    assert_eq!(summary["status"], "fixed");
    assert_eq!(summary["issues"][0]["rule"], "structure");
    let issues = summary["issues"].as_array().unwrap();
    let outcomes = summary["outcomes"].as_array().unwrap();
    assert_eq!(issues.len(), outcomes.len());
}

#[test]
fn root_flag_targets_another_directory() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join("site");
    std::fs::create_dir(&project).unwrap();
    std::fs::write(project.join("package.json"), COMPLETE_MANIFEST).unwrap();

    let output = run_dywo(dir.path(), &["repair", "--fix", "--root", "site"], &[]);
    assert_eq!(exit_code(&output), 0);
    assert!(project.join(".dywo").is_file());
    assert!(!dir.path().join(".dywo").exists());
}

#[test]
fn missing_root_is_an_operational_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_dywo(dir.path(), &["repair", "--root", "nowhere"], &[]);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(exit_code(&output), 4);
    assert!(stderr.contains("not a directory"));
}

#[test]
fn record_and_replay_together_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_dywo(
        dir.path(),
        &["repair"],
        &[("DYWO_RECORD", "rec"), ("DYWO_REPLAY", "rep")],
    );
    assert_eq!(exit_code(&output), 4);
}

#[test]
fn env_file_selects_the_package_manager() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "DYWO_PACKAGE_MANAGER=yarn\n").unwrap();
    std::fs::write(dir.path().join("package.json"), COMPLETE_MANIFEST).unwrap();

    let output = run_dywo(dir.path(), &["repair", "--fix"], &[]);
    assert_eq!(exit_code(&output), 0);
    let readme = std::fs::read_to_string(dir.path().join("README.md")).unwrap();
    assert!(readme.contains("yarn run build"));
}

fn write_shell_cassette(dir: &Path, exit_code: i32) {
    let cassette = Cassette {
        name: "repair-shell".into(),
        recorded_at: Utc::now(),
        tool_version: "0.1.0".into(),
        interactions: (0..2)
            .map(|seq| Interaction {
                seq,
                port: "shell".into(),
                method: "run".into(),
                input: json!({"command": "npm install"}),
                output: json!({"ok": {"exit_code": exit_code, "stdout": "", "stderr": "ERR! 404"}}),
            })
            .collect(),
    };
    std::fs::create_dir_all(dir).unwrap();
    let yaml = serde_yaml::to_string(&cassette).unwrap();
    std::fs::write(dir.join("shell.cassette.yaml"), yaml).unwrap();
}

#[test]
fn failed_install_from_replayed_shell_exits_three() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join("app");
    std::fs::create_dir(&project).unwrap();
    let cassettes = dir.path().join("cassettes");
    write_shell_cassette(&cassettes, 1);

    let output = run_dywo(
        &project,
        &["repair", "--fix", "--no-color"],
        &[("DYWO_REPLAY", cassettes.to_str().unwrap())],
    );
    let text = stdout(&output);

    assert_eq!(exit_code(&output), 3, "{text}");
    assert!(text.contains("✗ Failed to fix: Missing runtime dependencies"));
    assert!(text.contains("ERR! 404"));
    assert!(project.join(".dywo").is_file());
}

#[test]
fn successful_install_from_replayed_shell_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let project = dir.path().join("app");
    std::fs::create_dir(&project).unwrap();
    let cassettes = dir.path().join("cassettes");
    write_shell_cassette(&cassettes, 0);

    let output = run_dywo(
        &project,
        &["repair", "--fix"],
        &[("DYWO_REPLAY", cassettes.to_str().unwrap())],
    );
    assert_eq!(exit_code(&output), 0);
}
