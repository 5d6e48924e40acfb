//! Cassettes: YAML recordings of external interactions.
//!
//! Setting `DYWO_RECORD=<dir>` wraps the shell, prompt and clock ports in
//! recording adapters; `DYWO_REPLAY=<dir>` serves the same ports from the
//! recorded files instead of touching the terminal or spawning tools.

pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;

/// Ports that take part in recording and replay.
pub const RECORDED_PORTS: [&str; 3] = ["shell", "prompt", "clock"];

/// File name of the cassette for `port` inside a session directory.
#[must_use]
pub fn cassette_file_name(port: &str) -> String {
    format!("{port}.cassette.yaml")
}
