//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::repair::report::OutputFormat;

/// Top-level CLI parser for `dywo`.
#[derive(Debug, Parser)]
#[command(
    name = "dywo",
    version,
    about = "Diagnose and repair Dywo project layouts"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check the project for missing or malformed files and optionally fix them.
    Repair(RepairArgs),
}

/// Arguments for `dywo repair`.
#[derive(Debug, Clone, Args)]
pub struct RepairArgs {
    /// Fix every issue without asking for confirmation.
    #[arg(short, long)]
    pub fix: bool,

    /// After fixing, run the bundler, the linter and each package script once.
    #[arg(long)]
    pub verify: bool,

    /// Project root (defaults to the current directory).
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Format of the final summary.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Disable coloured output.
    #[arg(long)]
    pub no_color: bool,
}
