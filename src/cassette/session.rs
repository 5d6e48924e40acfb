//! Recording session managing per-port cassette recorders.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::recorder::CassetteRecorder;
use super::{cassette_file_name, RECORDED_PORTS};

/// Shared handle to one port's recorder.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

/// Owns one `CassetteRecorder` per recorded port.
///
/// Each port writes its own `<port>.cassette.yaml` inside `output_dir`, so a
/// replay can load any subset of them.
pub struct RecordingSession {
    /// Recorder for shell interactions.
    pub shell: SharedRecorder,
    /// Recorder for prompt interactions.
    pub prompt: SharedRecorder,
    /// Recorder for clock interactions.
    pub clock: SharedRecorder,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Create a session writing into `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory already holds cassettes or cannot
    /// be created.
    pub fn new(output_dir: &Path) -> Result<Self, String> {
        let already_recorded = RECORDED_PORTS
            .iter()
            .any(|port| output_dir.join(cassette_file_name(port)).exists());
        if already_recorded {
            return Err(format!(
                "Cassette directory already contains recordings: {}",
                output_dir.display()
            ));
        }
        std::fs::create_dir_all(output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let make_recorder = |port: &str| -> SharedRecorder {
            let path = output_dir.join(cassette_file_name(port));
            let recorder = CassetteRecorder::new(path, format!("repair-{port}"));
            Arc::new(Mutex::new(recorder))
        };

        Ok(Self {
            shell: make_recorder("shell"),
            prompt: make_recorder("prompt"),
            clock: make_recorder("clock"),
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Finish all recorders and write the cassette files.
    ///
    /// Every adapter holding a clone of a recorder must be dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if a recorder is still shared or a file cannot be
    /// written.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(arc: SharedRecorder, port: &str) -> Result<(), String> {
            let recorder = Arc::try_unwrap(arc)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            recorder
                .finish()
                .map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            Ok(())
        }

        finish_one(self.shell, "shell")?;
        finish_one(self.prompt, "prompt")?;
        finish_one(self.clock, "clock")?;
        Ok(self.output_dir)
    }
}
