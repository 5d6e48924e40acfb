//! Console output and the end-of-run summary.
//!
//! Progress lines go through a [`Console`] while the run is in flight; the
//! [`RepairSummary`] is rendered once at the end in the requested
//! [`OutputFormat`].

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde::Serialize;

use super::remedy::RemediationOutcome;
use super::verify::CheckResult;
use super::Issue;

/// Format of the final summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
    /// YAML.
    Yaml,
}

/// Where progress lines go and whether they are coloured.
///
/// Machine-readable formats send progress to stderr so stdout carries only
/// the summary document.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    color: bool,
    to_stderr: bool,
}

impl Console {
    /// Builds a console for `format`. Colour requires the text format and
    /// neither `--no-color` nor `NO_COLOR`.
    #[must_use]
    pub fn new(format: OutputFormat, no_color: bool) -> Self {
        let text = format == OutputFormat::Text;
        Self {
            color: text && !no_color,
            to_stderr: !text,
        }
    }

    /// Whether ANSI colours are enabled.
    #[must_use]
    pub fn color(&self) -> bool {
        self.color
    }

    /// Prints a plain progress line.
    pub fn line(&self, text: &str) {
        if self.to_stderr {
            eprintln!("{text}");
        } else {
            println!("{text}");
        }
    }

    /// Prints a bold heading.
    pub fn heading(&self, text: &str) {
        self.line(&self.paint(text, Tone::Heading));
    }

    /// Prints a success line prefixed with `✓`.
    pub fn success(&self, text: &str) {
        self.line(&format!("{} {text}", self.paint("✓", Tone::Good)));
    }

    /// Prints a failure line prefixed with `✗`.
    pub fn failure(&self, text: &str) {
        self.line(&format!("{} {text}", self.paint("✗", Tone::Bad)));
    }

    /// Prints a warning to stderr.
    pub fn warn(&self, text: &str) {
        eprintln!("{} {text}", self.paint("Warning:", Tone::Warn));
    }

    fn paint(&self, text: &str, tone: Tone) -> String {
        paint(text, tone, self.color)
    }
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Good,
    Bad,
    Warn,
    Heading,
}

fn paint(text: &str, tone: Tone, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match tone {
        Tone::Good => text.green().bold().to_string(),
        Tone::Bad => text.red().bold().to_string(),
        Tone::Warn => text.yellow().bold().to_string(),
        Tone::Heading => text.bold().to_string(),
    }
}

/// How the run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepairStatus {
    /// No issues were found.
    Clean,
    /// Every remediation succeeded.
    Fixed,
    /// Issues were found and left alone.
    Declined,
    /// At least one remediation failed.
    PartiallyFixed,
}

impl RepairStatus {
    /// Derives the status from what was found and what was attempted.
    #[must_use]
    pub fn from_run(issues: &[Issue], outcomes: &[RemediationOutcome], attempted: bool) -> Self {
        if issues.is_empty() {
            Self::Clean
        } else if !attempted {
            Self::Declined
        } else if outcomes.iter().all(RemediationOutcome::succeeded) {
            Self::Fixed
        } else {
            Self::PartiallyFixed
        }
    }

    /// Process exit code for this status.
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Clean | Self::Fixed => 0,
            Self::Declined => 1,
            Self::PartiallyFixed => 3,
        }
    }
}

/// Everything one `dywo repair` run found and did.
#[derive(Debug, Clone, Serialize)]
pub struct RepairSummary {
    /// Unique id of this run.
    pub run_id: String,
    /// When diagnosis started.
    pub started_at: DateTime<Utc>,
    /// When the run finished.
    pub finished_at: DateTime<Utc>,
    /// The project root.
    pub root: PathBuf,
    /// Issues in collection order.
    pub issues: Vec<Issue>,
    /// One outcome per issue, empty when remediation did not run.
    pub outcomes: Vec<RemediationOutcome>,
    /// Verification results, empty unless requested.
    pub verification: Vec<CheckResult>,
    /// Final status.
    pub status: RepairStatus,
    /// Process exit code.
    pub exit_code: u8,
}

impl RepairSummary {
    /// Number of successful remediations.
    #[must_use]
    pub fn fixed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.succeeded()).count()
    }

    /// Number of failed remediations.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.fixed_count()
    }
}

/// Formats the closing text block of a run.
#[must_use]
pub fn format_text(summary: &RepairSummary, color: bool) -> String {
    let mut lines = vec![paint("Summary", Tone::Heading, color)];
    lines.push(format!("  Issues found: {}", summary.issues.len()));
    if !summary.outcomes.is_empty() {
        lines.push(format!("  Fixed: {}", summary.fixed_count()));
        lines.push(format!("  Failed: {}", summary.failed_count()));
    }
    if !summary.verification.is_empty() {
        let passed = summary.verification.iter().filter(|c| c.passed).count();
        let total = summary.verification.len();
        lines.push(format!("  Verification: {passed}/{total} passed"));
    }
    let status = match summary.status {
        RepairStatus::Clean => paint("clean", Tone::Good, color),
        RepairStatus::Fixed => paint("fixed", Tone::Good, color),
        RepairStatus::Declined => paint("unfixed", Tone::Warn, color),
        RepairStatus::PartiallyFixed => paint("partially fixed", Tone::Bad, color),
    };
    lines.push(format!("  Status: {status}"));
    lines.join("\n")
}

/// Renders the summary in `format`.
///
/// # Errors
///
/// Returns an error string if serialization fails.
pub fn render(
    summary: &RepairSummary,
    format: OutputFormat,
    color: bool,
) -> Result<String, String> {
    match format {
        OutputFormat::Text => Ok(format_text(summary, color)),
        OutputFormat::Json => serde_json::to_string_pretty(summary)
            .map_err(|e| format!("Failed to serialize summary as JSON: {e}")),
        OutputFormat::Yaml => serde_yaml::to_string(summary)
            .map(|yaml| yaml.trim_end().to_string())
            .map_err(|e| format!("Failed to serialize summary as YAML: {e}")),
    }
}
