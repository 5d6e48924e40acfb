//! Replaying adapter for the `ShellExecutor` port.

use std::path::Path;
use std::sync::Mutex;

use super::replay_result;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::shell::{ShellExecutor, ShellOutput};
use crate::ports::PortError;

/// Replays recorded shell command results from a cassette.
pub struct ReplayingShellExecutor {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingShellExecutor {
    /// Creates a new replaying shell executor from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self {
            replayer: Mutex::new(replayer),
        }
    }
}

impl ShellExecutor for ReplayingShellExecutor {
    fn run(&self, command: &str, _cwd: &Path) -> Result<ShellOutput, PortError> {
        let value = replay_result(&self.replayer, "shell", "run")?;
        serde_json::from_value(value).map_err(|e| {
            format!("shell::run: recorded output for `{command}` is malformed: {e}").into()
        })
    }
}
