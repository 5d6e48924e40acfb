//! Core library entry for the `dywo` CLI.
//!
//! `dywo repair` diagnoses a single-page-application project against a
//! fixed set of rules and, when confirmed, repairs what it finds.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod ports;
pub mod project;
pub mod repair;

use clap::Parser;

/// Run the CLI with the provided arguments and return the exit code.
///
/// Help and version requests print to stdout and return 0; usage errors
/// print to stderr and return clap's exit code (2).
///
/// # Errors
///
/// Returns an error string when command execution fails.
pub fn run<I, T>(args: I) -> Result<u8, String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            err.print()
                .map_err(|e| format!("Failed to print usage: {e}"))?;
            return Ok(u8::try_from(err.exit_code()).unwrap_or(2));
        }
    };
    commands::dispatch(&cli.command)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_prints_version() {
        assert_eq!(run(["dywo", "--version"]), Ok(0));
    }

    #[test]
    fn run_rejects_unknown_subcommand() {
        assert_eq!(run(["dywo", "unknown"]), Ok(2));
    }

    #[test]
    fn run_requires_a_subcommand() {
        assert_eq!(run(["dywo"]), Ok(2));
    }
}
