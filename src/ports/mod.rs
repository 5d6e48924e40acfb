//! Port traits defining external boundaries.
//!
//! Each trait is one boundary between the repair engine and the outside
//! world (disk, child processes, the terminal, time, ids). Implementations
//! live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod id_gen;
pub mod prompt;
pub mod shell;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use id_gen::IdGenerator;
pub use prompt::Prompt;
pub use shell::{ShellExecutor, ShellOutput};

/// Error type returned by every port method.
pub type PortError = Box<dyn std::error::Error + Send + Sync>;
