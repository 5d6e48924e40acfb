//! Command dispatch and handlers.

pub mod repair;

use std::env;

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::config::Settings;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler and return the exit code.
///
/// When `DYWO_RECORD` is set to a directory path, shell, prompt and clock
/// interactions are recorded to per-port cassette files in that directory.
/// When `DYWO_REPLAY` is set, they are served from those cassettes instead.
///
/// # Errors
///
/// Returns an error string if settings are invalid, a cassette cannot be
/// read or written, or the command handler fails.
pub fn dispatch(command: &Command) -> Result<u8, String> {
    let settings = Settings::from_env()?;

    if let Some(dir) = settings.record_dir.clone() {
        let session = RecordingSession::new(&dir)?;
        let ctx = ServiceContext::recording(settings, &session);
        let result = dispatch_with_context(command, &ctx);

        // Drop context first to release Arc references
        drop(ctx);
        finish_recording(session)?;
        return result;
    }

    let ctx = match settings.replay_dir.clone() {
        Some(dir) => ServiceContext::replaying(settings, &dir)?,
        None => ServiceContext::live(settings),
    };
    dispatch_with_context(command, &ctx)
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the command handler fails.
pub fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<u8, String> {
    match command {
        Command::Repair(args) => {
            let cwd = env::current_dir()
                .map_err(|e| format!("Failed to read current directory: {e}"))?;
            repair::run(ctx, args, &cwd)
        }
    }
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
