//! Replaying adapter for the Clock port.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;

/// Replays recorded clock values from a cassette.
///
/// Falls back to the real time (with a warning) once the recording runs
/// out, since a summary timestamp is not worth aborting a replay for.
pub struct ReplayingClock {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingClock {
    /// Creates a new replaying clock from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self {
            replayer: Mutex::new(replayer),
        }
    }

    fn next_recorded(&self) -> Result<DateTime<Utc>, String> {
        let output = {
            let mut replayer = self
                .replayer
                .lock()
                .map_err(|e| format!("clock replayer lock poisoned: {e}"))?;
            replayer.next_interaction("clock", "now")?.output.clone()
        };
        serde_json::from_value(output).map_err(|e| format!("clock::now: bad timestamp: {e}"))
    }
}

impl Clock for ReplayingClock {
    fn now(&self) -> DateTime<Utc> {
        self.next_recorded().unwrap_or_else(|e| {
            eprintln!("Warning: {e}; using the system clock");
            Utc::now()
        })
    }
}
