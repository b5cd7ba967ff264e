//! Configuration types for open-here

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::platform::LauncherTable;

/// File opened when nothing overrides it
pub const DEFAULT_TARGET: &str = "go.mod";

/// One configuration file (all keys optional)
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub unsupported_os: Option<UnsupportedOs>,
    #[serde(default)]
    pub launchers: LauncherOverrides,
}

impl Config {
    /// Read a config file; returns None if it does not exist
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str::<Config>(&content)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// What to do when the OS has no dedicated launcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnsupportedOs {
    /// Log a notice and try the fallback launcher anyway
    #[default]
    Fallthrough,
    /// Fail before spawning anything
    Abort,
}

/// Per-OS launcher overrides
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LauncherOverrides {
    #[serde(default)]
    pub windows: Option<String>,
    #[serde(default)]
    pub darwin: Option<String>,
    #[serde(default)]
    pub fallback: Option<String>,
}

/// Fully merged settings used by the opener
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub target: String,
    pub unsupported_os: UnsupportedOs,
    pub launchers: LauncherTable,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            unsupported_os: UnsupportedOs::default(),
            launchers: LauncherTable::default(),
        }
    }
}
