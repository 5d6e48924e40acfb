//! `dywo repair` command.

use std::path::Path;

use crate::cli::RepairArgs;
use crate::context::ServiceContext;
use crate::project::ProjectRoot;
use crate::repair::remedy::remediate;
use crate::repair::report::{render, Console, OutputFormat, RepairStatus, RepairSummary};
use crate::repair::verify::verify;
use crate::repair::{collect, Issue};

/// Asked before remediating when `--fix` is absent.
pub const CONFIRM_QUESTION: &str = "Do you want to automatically fix these issues?";

/// Printed when issues are left unfixed.
pub const DECLINE_MESSAGE: &str =
    "No changes made. Run `dywo repair --fix` to automatically fix issues.";

/// Execute the `repair` command against the root named in `args`, or `cwd`.
///
/// Returns the process exit code: 0 when clean or fully fixed, 1 when issues
/// were left unfixed, 3 when a remediation failed.
///
/// # Errors
///
/// Returns an error string if the root is not a directory or the summary
/// cannot be rendered.
pub fn run(ctx: &ServiceContext, args: &RepairArgs, cwd: &Path) -> Result<u8, String> {
    let console = Console::new(args.format, args.no_color || ctx.settings.no_color);
    let root = ProjectRoot::resolve(args.root.as_deref(), cwd, ctx.fs.as_ref())?;
    let summary = repair(ctx, &root, args, &console);

    if args.format == OutputFormat::Text {
        println!();
    }
    println!("{}", render(&summary, args.format, console.color())?);
    Ok(summary.exit_code)
}

/// Diagnoses `root`, passes the confirmation gate, remediates and verifies.
///
/// Progress goes to `console`; the returned summary holds everything that
/// happened.
pub fn repair(
    ctx: &ServiceContext,
    root: &ProjectRoot,
    args: &RepairArgs,
    console: &Console,
) -> RepairSummary {
    let run_id = ctx.id_gen.generate_id();
    let started_at = ctx.clock.now();

    console.line(&format!("Checking project at {}", root.path().display()));
    let issues = collect(ctx, root);
    report_issues(console, &issues);

    let attempted = !issues.is_empty() && (args.fix || confirm(ctx, console));
    let mut outcomes = Vec::new();
    let mut verification = Vec::new();
    if attempted {
        outcomes = remediate(ctx, root, &issues, console);
        if args.verify {
            verification = verify(ctx, root, console);
        }
    } else if !issues.is_empty() {
        console.line(DECLINE_MESSAGE);
    }

    let status = RepairStatus::from_run(&issues, &outcomes, attempted);
    RepairSummary {
        run_id,
        started_at,
        finished_at: ctx.clock.now(),
        root: root.path().to_path_buf(),
        issues,
        outcomes,
        verification,
        status,
        exit_code: status.exit_code(),
    }
}

fn report_issues(console: &Console, issues: &[Issue]) {
    if issues.is_empty() {
        console.success("No issues found. Project structure is valid.");
        return;
    }
    console.heading(&format!("Found {} issue(s):", issues.len()));
    for (i, issue) in issues.iter().enumerate() {
        console.line(&format!("  {}. {}", i + 1, issue.message));
    }
}

/// A prompt that cannot be answered counts as a no.
fn confirm(ctx: &ServiceContext, console: &Console) -> bool {
    match ctx.prompt.confirm(CONFIRM_QUESTION) {
        Ok(answer) => answer,
        Err(e) => {
            let warning = format!("could not read confirmation ({e}); leaving issues unfixed");
            console.warn(&warning);
            false
        }
    }
}
