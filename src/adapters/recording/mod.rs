//! Recording adapters that capture interactions to cassettes.

pub mod clock;
pub mod prompt;
pub mod shell;

pub use clock::RecordingClock;
pub use prompt::RecordingPrompt;
pub use shell::RecordingShellExecutor;

use serde::Serialize;

use crate::cassette::session::SharedRecorder;

/// Record an interaction with a plain (non-`Result`) return value.
pub(crate) fn record_interaction<I, O>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let input_json = serde_json::to_value(input).unwrap_or(serde_json::Value::Null);
    let output_json = serde_json::to_value(output).unwrap_or(serde_json::Value::Null);
    push(recorder, port, method, input_json, output_json);
}

/// Record a `Result<T, E>` interaction.
///
/// `Ok(v)` is stored as `{"ok": v}` and `Err(e)` as `{"err": "<message>"}`,
/// the shape [`crate::adapters::replaying`] reads back.
pub(crate) fn record_result<T, E, I>(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let input_json = serde_json::to_value(input).unwrap_or(serde_json::Value::Null);
    let output_json = match result {
        Ok(v) => {
            let value = serde_json::to_value(v).unwrap_or(serde_json::Value::Null);
            serde_json::json!({ "ok": value })
        }
        Err(e) => serde_json::json!({ "err": e.to_string() }),
    };
    push(recorder, port, method, input_json, output_json);
}

fn push(
    recorder: &SharedRecorder,
    port: &str,
    method: &str,
    input: serde_json::Value,
    output: serde_json::Value,
) {
    match recorder.lock() {
        Ok(mut guard) => guard.record(port, method, input, output),
        Err(e) => {
            eprintln!("Warning: dropping {port}::{method} interaction, recorder poisoned: {e}");
        }
    }
}
