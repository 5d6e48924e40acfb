//! Service context bundling all port trait objects.

use std::path::Path;

use crate::adapters::live::{
    DecliningPrompt, LiveClock, LiveFileSystem, LiveIdGenerator, LiveShellExecutor,
    TerminalPrompt,
};
use crate::adapters::recording::{RecordingClock, RecordingPrompt, RecordingShellExecutor};
use crate::adapters::replaying::{ReplayingClock, ReplayingPrompt, ReplayingShellExecutor};
use crate::cassette::cassette_file_name;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::Settings;
use crate::ports::{Clock, FileSystem, IdGenerator, PortError, Prompt, ShellExecutor, ShellOutput};

/// Bundles all port trait objects and the resolved settings.
///
/// Constructors wire live, recording or replaying adapters; the `with_*`
/// methods swap a single port, which is how tests inject canned answers.
pub struct ServiceContext {
    /// Clock for run timestamps.
    pub clock: Box<dyn Clock>,
    /// Filesystem for project files.
    pub fs: Box<dyn FileSystem>,
    /// Shell executor for installers, bundler, linter and scripts.
    pub shell: Box<dyn ShellExecutor>,
    /// Confirmation prompt.
    pub prompt: Box<dyn Prompt>,
    /// Run id generator.
    pub id_gen: Box<dyn IdGenerator>,
    /// Settings resolved from the environment.
    pub settings: Settings,
}

impl ServiceContext {
    /// Creates a live context with real adapters.
    ///
    /// The prompt reads the terminal unless `settings.non_interactive` is set,
    /// in which case every confirmation is declined.
    #[must_use]
    pub fn live(settings: Settings) -> Self {
        Self {
            clock: Box::new(LiveClock),
            fs: Box::new(LiveFileSystem),
            shell: Box::new(LiveShellExecutor),
            prompt: live_prompt(&settings),
            id_gen: Box::new(LiveIdGenerator),
            settings,
        }
    }

    /// Creates a live context whose shell, prompt and clock are recorded
    /// into `session`.
    #[must_use]
    pub fn recording(settings: Settings, session: &RecordingSession) -> Self {
        let prompt = live_prompt(&settings);
        Self {
            clock: Box::new(RecordingClock::new(
                Box::new(LiveClock),
                session.clock.clone(),
            )),
            fs: Box::new(LiveFileSystem),
            shell: Box::new(RecordingShellExecutor::new(
                Box::new(LiveShellExecutor),
                session.shell.clone(),
            )),
            prompt: Box::new(RecordingPrompt::new(prompt, session.prompt.clone())),
            id_gen: Box::new(LiveIdGenerator),
            settings,
        }
    }

    /// Creates a context that replays shell, prompt and clock cassettes from
    /// `dir`. The filesystem stays live.
    ///
    /// A port without a cassette file fails each call with an error (the
    /// clock falls back to the system time).
    ///
    /// # Errors
    ///
    /// Returns an error if a cassette file exists but cannot be parsed.
    pub fn replaying(settings: Settings, dir: &Path) -> Result<Self, String> {
        let load = |port: &str| -> Result<Option<CassetteReplayer>, String> {
            let path = dir.join(cassette_file_name(port));
            if path.exists() {
                CassetteReplayer::load(&path).map(Some)
            } else {
                Ok(None)
            }
        };

        Ok(Self {
            clock: match load("clock")? {
                Some(r) => Box::new(ReplayingClock::new(r)),
                None => Box::new(LiveClock),
            },
            fs: Box::new(LiveFileSystem),
            shell: match load("shell")? {
                Some(r) => Box::new(ReplayingShellExecutor::new(r)),
                None => Box::new(UnrecordedShell),
            },
            prompt: match load("prompt")? {
                Some(r) => Box::new(ReplayingPrompt::new(r)),
                None => Box::new(UnrecordedPrompt),
            },
            id_gen: Box::new(LiveIdGenerator),
            settings,
        })
    }

    /// Replaces the filesystem port.
    #[must_use]
    pub fn with_fs(mut self, fs: Box<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Replaces the shell port.
    #[must_use]
    pub fn with_shell(mut self, shell: Box<dyn ShellExecutor>) -> Self {
        self.shell = shell;
        self
    }

    /// Replaces the prompt port.
    #[must_use]
    pub fn with_prompt(mut self, prompt: Box<dyn Prompt>) -> Self {
        self.prompt = prompt;
        self
    }

    /// Replaces the clock port.
    #[must_use]
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replaces the id generator port.
    #[must_use]
    pub fn with_id_gen(mut self, id_gen: Box<dyn IdGenerator>) -> Self {
        self.id_gen = id_gen;
        self
    }
}

fn live_prompt(settings: &Settings) -> Box<dyn Prompt> {
    if settings.non_interactive {
        Box::new(DecliningPrompt)
    } else {
        Box::new(TerminalPrompt)
    }
}

// --- Stand-ins for ports with no cassette during replay ---

struct UnrecordedShell;
impl ShellExecutor for UnrecordedShell {
    fn run(&self, command: &str, _cwd: &Path) -> Result<ShellOutput, PortError> {
        let message =
            format!("no shell cassette loaded; refusing to run `{command}` during replay");
        Err(message.into())
    }
}

struct UnrecordedPrompt;
impl Prompt for UnrecordedPrompt {
    fn confirm(&self, _question: &str) -> Result<bool, PortError> {
        Err("no prompt cassette loaded for replay".into())
    }
}
