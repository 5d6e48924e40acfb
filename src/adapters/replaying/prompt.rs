//! Replaying adapter for the `Prompt` port.

use std::sync::Mutex;

use super::replay_result;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{PortError, Prompt};

/// Replays recorded confirmation answers.
pub struct ReplayingPrompt {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingPrompt {
    /// Creates a new replaying prompt from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self {
            replayer: Mutex::new(replayer),
        }
    }
}

impl Prompt for ReplayingPrompt {
    fn confirm(&self, _question: &str) -> Result<bool, PortError> {
        let value = replay_result(&self.replayer, "prompt", "confirm")?;
        value
            .as_bool()
            .ok_or_else(|| format!("prompt::confirm: expected a bool, got {value}").into())
    }
}
