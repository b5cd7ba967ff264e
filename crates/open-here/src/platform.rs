//! Platform-specific utilities

use std::fmt;
use std::path::Path;
use std::process::{Command, ExitStatus};

/// Operating system family the launcher is chosen for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsTag {
    Windows,
    Darwin,
    Other(String),
}

impl OsTag {
    /// OS family of the running binary
    pub fn host() -> Self {
        Self::from_identifier(std::env::consts::OS)
    }

    /// Parse an OS identifier (`macos` is accepted as an alias of `darwin`)
    pub fn from_identifier(id: &str) -> Self {
        match id {
            "windows" => Self::Windows,
            "darwin" | "macos" => Self::Darwin,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Windows => "windows",
            Self::Darwin => "darwin",
            Self::Other(id) => id,
        }
    }

    /// Returns true if a dedicated launcher exists for this OS
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for OsTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Launcher command for each OS family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherTable {
    pub windows: String,
    pub darwin: String,
    /// Used for any OS without a dedicated entry
    pub fallback: String,
}

impl LauncherTable {
    /// Pick the launcher for an OS
    pub fn select(&self, os: &OsTag) -> &str {
        match os {
            OsTag::Windows => &self.windows,
            OsTag::Darwin => &self.darwin,
            OsTag::Other(_) => &self.fallback,
        }
    }
}

impl Default for LauncherTable {
    fn default() -> Self {
        Self {
            windows: "explorer".to_string(),
            darwin: "open".to_string(),
            fallback: "open".to_string(),
        }
    }
}

/// How the launcher process finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildExit {
    Success,
    /// Exit code, or None when terminated by a signal
    Failed(Option<i32>),
}

impl ChildExit {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<ExitStatus> for ChildExit {
    fn from(status: ExitStatus) -> Self {
        if status.success() {
            Self::Success
        } else {
            Self::Failed(status.code())
        }
    }
}

impl fmt::Display for ChildExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Failed(Some(code)) => write!(f, "exit code {}", code),
            Self::Failed(None) => f.write_str("terminated by signal"),
        }
    }
}

/// Runs a launcher against a path and waits for it to finish
pub trait Spawner {
    fn run(&self, launcher: &str, path: &Path) -> std::io::Result<ChildExit>;
}

/// Spawns real child processes; stdio is inherited from the parent
pub struct SystemSpawner;

impl Spawner for SystemSpawner {
    fn run(&self, launcher: &str, path: &Path) -> std::io::Result<ChildExit> {
        let status = Command::new(launcher).arg(path).status()?;
        Ok(status.into())
    }
}
