//! Runtime settings resolved from the environment.
//!
//! `main` loads `.env` with `dotenvy` first, so every variable below can also
//! live in a project-local `.env` file. Command-line flags override these.

use std::path::PathBuf;

use crate::repair::DependencyClass;

/// Package manager used for installs and script runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageManager {
    /// `npm` (default).
    #[default]
    Npm,
    /// `yarn` (classic CLI syntax).
    Yarn,
    /// `pnpm`.
    Pnpm,
}

impl PackageManager {
    /// Parses a package manager name as accepted by `DYWO_PACKAGE_MANAGER`.
    ///
    /// # Errors
    ///
    /// Returns an error string naming the accepted values.
    pub fn parse(name: &str) -> Result<Self, String> {
        match name.trim().to_ascii_lowercase().as_str() {
            "npm" => Ok(Self::Npm),
            "yarn" => Ok(Self::Yarn),
            "pnpm" => Ok(Self::Pnpm),
            other => Err(format!(
                "Unknown package manager: {other}. Supported: npm, yarn, pnpm"
            )),
        }
    }

    /// Executable name.
    #[must_use]
    pub fn binary(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
        }
    }

    /// Command line that installs `packages` into the given dependency class.
    ///
    /// Each package is a bare name or a `name@range` spec.
    #[must_use]
    pub fn install_command(self, class: DependencyClass, packages: &[String]) -> String {
        let flag = match (self, class) {
            (Self::Npm, DependencyClass::Runtime) => "install --save",
            (Self::Npm, DependencyClass::Development) => "install --save-dev",
            (Self::Yarn | Self::Pnpm, DependencyClass::Runtime) => "add",
            (Self::Yarn, DependencyClass::Development) => "add --dev",
            (Self::Pnpm, DependencyClass::Development) => "add --save-dev",
        };
        let packages: Vec<String> = packages.iter().map(|p| shell_quote(p)).collect();
        format!("{} {flag} {}", self.binary(), packages.join(" "))
    }

    /// Command line that runs a `package.json` script.
    ///
    /// Script names come from the manifest, so anything outside a plain
    /// word is single-quoted before it reaches the shell.
    #[must_use]
    pub fn run_script_command(self, script: &str) -> String {
        format!("{} run {}", self.binary(), shell_quote(script))
    }
}

/// Quotes `word` for `sh -c` unless every character is shell-inert.
fn shell_quote(word: &str) -> String {
    let inert = |c: char| c.is_ascii_alphanumeric() || "-_.:/@^=+,%".contains(c);
    if !word.is_empty() && word.chars().all(inert) {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', "'\\''"))
    }
}

/// Settings read from environment variables.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// `DYWO_PACKAGE_MANAGER`.
    pub package_manager: PackageManager,
    /// `DYWO_NONINTERACTIVE`: answer "no" to confirmations without asking.
    pub non_interactive: bool,
    /// `DYWO_RECORD`: directory to record cassettes into.
    pub record_dir: Option<PathBuf>,
    /// `DYWO_REPLAY`: directory to replay cassettes from.
    pub replay_dir: Option<PathBuf>,
    /// `NO_COLOR`.
    pub no_color: bool,
}

impl Settings {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns an error if `DYWO_PACKAGE_MANAGER` is unknown or both
    /// `DYWO_RECORD` and `DYWO_REPLAY` are set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let package_manager = match non_empty("DYWO_PACKAGE_MANAGER") {
            Some(name) => PackageManager::parse(&name)?,
            None => PackageManager::default(),
        };
        let record_dir = non_empty("DYWO_RECORD").map(PathBuf::from);
        let replay_dir = non_empty("DYWO_REPLAY").map(PathBuf::from);
        if record_dir.is_some() && replay_dir.is_some() {
            return Err("Set only one of DYWO_RECORD and DYWO_REPLAY".to_string());
        }

        Ok(Self {
            package_manager,
            non_interactive: lookup("DYWO_NONINTERACTIVE").is_some(),
            record_dir,
            replay_dir,
            no_color: lookup("NO_COLOR").is_some(),
        })
    }
}
