//! Replaying adapters that serve recorded interactions.

pub mod clock;
pub mod prompt;
pub mod shell;

pub use clock::ReplayingClock;
pub use prompt::ReplayingPrompt;
pub use shell::ReplayingShellExecutor;

use std::sync::Mutex;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::PortError;

/// Pull the next recorded `{"ok": ..}` / `{"err": ..}` output for a pair.
pub(crate) fn replay_result(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> Result<serde_json::Value, PortError> {
    let output = {
        let mut replayer = replayer
            .lock()
            .map_err(|e| format!("{port} replayer lock poisoned: {e}"))?;
        replayer.next_interaction(port, method)?.output.clone()
    };
    if let Some(err) = output.get("err") {
        let message = err.as_str().unwrap_or("unknown error");
        return Err(message.to_string().into());
    }
    Ok(output.get("ok").cloned().unwrap_or(output))
}
