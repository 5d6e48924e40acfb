//! Recording adapter for the `Prompt` port.

use serde::Serialize;

use super::record_result;
use crate::cassette::session::SharedRecorder;
use crate::ports::{PortError, Prompt};

/// Records confirmation answers while delegating to an inner prompt.
pub struct RecordingPrompt {
    inner: Box<dyn Prompt>,
    recorder: SharedRecorder,
}

impl RecordingPrompt {
    /// Creates a new recording prompt wrapping the given implementation.
    pub fn new(inner: Box<dyn Prompt>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct QuestionInput<'a> {
    question: &'a str,
}

impl Prompt for RecordingPrompt {
    fn confirm(&self, question: &str) -> Result<bool, PortError> {
        let result = self.inner.confirm(question);
        let input = QuestionInput { question };
        record_result(&self.recorder, "prompt", "confirm", &input, &result);
        result
    }
}
