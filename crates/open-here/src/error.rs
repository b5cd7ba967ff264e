//! Error types for open-here

use std::path::PathBuf;

use thiserror::Error;

/// Failures while opening the target file
#[derive(Debug, Error)]
pub enum OpenError {
    #[error("failed to spawn '{launcher}': {source}")]
    Spawn {
        launcher: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{launcher}' exited unsuccessfully ({status})")]
    ChildFailed { launcher: String, status: String },

    #[error("unsupported OS: {0}")]
    UnsupportedOs(String),
}

/// Failures while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("target must be a non-empty relative path, got '{0}'")]
    InvalidTarget(String),
}
