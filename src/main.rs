//! Binary entrypoint for the `dywo` CLI.

use std::process::ExitCode;

/// Exit code for failures outside the repair flow itself.
const OPERATIONAL_ERROR: u8 = 4;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    // Recording and replay are handled in commands::dispatch via DYWO_RECORD / DYWO_REPLAY.
    match dywo::run(std::env::args()) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(OPERATIONAL_ERROR)
        }
    }
}
