//! Prompt port for interactive yes/no confirmation.

use super::PortError;

/// Asks the user to confirm an action.
///
/// The repair command never reads the terminal directly, so tests can
/// answer with a canned value.
pub trait Prompt: Send + Sync {
    /// Asks `question` and returns the answer. Waits indefinitely.
    ///
    /// # Errors
    ///
    /// Returns an error if the answer cannot be read.
    fn confirm(&self, question: &str) -> Result<bool, PortError>;
}
