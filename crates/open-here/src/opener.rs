//! Opens the target file from the working directory with the OS launcher

use std::path::{Path, PathBuf};

use crate::config::{Settings, UnsupportedOs};
use crate::error::OpenError;
use crate::logging::DIAGNOSTICS;
use crate::platform::{OsTag, Spawner};

/// Fatal message logged when the launcher cannot open the target
pub const OPEN_FAILED_MESSAGE: &str = "Failed to open downloaded test file!";

/// Log the fatal diagnostic for a failed open
pub fn report_failure(err: &OpenError) {
    tracing::error!(target: DIAGNOSTICS, error = %err, "{}", OPEN_FAILED_MESSAGE);
}

/// A launcher invocation: argv is `[launcher, path]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub launcher: String,
    pub path: PathBuf,
}

impl Invocation {
    pub fn argv(&self) -> Vec<String> {
        vec![
            self.launcher.clone(),
            self.path.to_string_lossy().to_string(),
        ]
    }
}

/// Opener for a single run
pub struct Opener {
    os: OsTag,
    settings: Settings,
}

impl Opener {
    pub fn new(os: OsTag, settings: Settings) -> Self {
        Self { os, settings }
    }

    /// Build the target path; an empty working directory yields the bare target
    pub fn target_path(&self, working_dir: &Path) -> PathBuf {
        working_dir.join(&self.settings.target)
    }

    /// Choose the launcher and target without running anything
    pub fn plan(&self, working_dir: &Path) -> Result<Invocation, OpenError> {
        if !self.os.is_supported() {
            tracing::warn!(target: DIAGNOSTICS, "Not supported OS");
            if self.settings.unsupported_os == UnsupportedOs::Abort {
                return Err(OpenError::UnsupportedOs(self.os.to_string()));
            }
        }

        Ok(Invocation {
            launcher: self.settings.launchers.select(&self.os).to_string(),
            path: self.target_path(working_dir),
        })
    }

    /// Open the target and wait for the launcher to exit
    ///
    /// A missing working directory is not fatal: the error is printed to
    /// stdout and the target is resolved relative to the launcher.
    pub fn open(
        &self,
        working_dir: std::io::Result<PathBuf>,
        spawner: &dyn Spawner,
    ) -> Result<Invocation, OpenError> {
        let working_dir = match working_dir {
            Ok(dir) => {
                tracing::info!(target: DIAGNOSTICS, "{}", dir.display());
                dir
            }
            Err(e) => {
                tracing::info!(target: DIAGNOSTICS, "");
                println!("{}", e);
                PathBuf::new()
            }
        };
        tracing::info!(target: DIAGNOSTICS, "GOOS : {}", self.os);

        let invocation = self.plan(&working_dir)?;
        tracing::debug!(argv = ?invocation.argv(), "Spawning launcher");

        let exit = spawner
            .run(&invocation.launcher, &invocation.path)
            .map_err(|source| OpenError::Spawn {
                launcher: invocation.launcher.clone(),
                source,
            })?;

        if exit.is_success() {
            Ok(invocation)
        } else {
            Err(OpenError::ChildFailed {
                launcher: invocation.launcher,
                status: exit.to_string(),
            })
        }
    }
}
