//! Shell executor port for running external tools.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::PortError;

/// The output of a finished external command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellOutput {
    /// The exit code of the process (`-1` when killed by a signal).
    pub exit_code: i32,
    /// The captured standard output.
    pub stdout: String,
    /// The captured standard error.
    pub stderr: String,
}

impl ShellOutput {
    /// Returns `true` when the process exited with code 0.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Executes shell commands such as package installs, bundler and linter runs.
///
/// Calls block until the child exits; there is no timeout.
pub trait ShellExecutor: Send + Sync {
    /// Runs a command string in the system shell with `cwd` as the working
    /// directory and returns its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned. A non-zero exit is
    /// not an error; inspect [`ShellOutput::exit_code`].
    fn run(&self, command: &str, cwd: &Path) -> Result<ShellOutput, PortError>;
}
