//! Configuration module for open-here

mod resolver;
mod types;

use std::path::{Path, PathBuf};

pub use resolver::{ResolvedSettings, SettingsResolver};
pub use types::{Config, Settings, UnsupportedOs, DEFAULT_TARGET};

use crate::error::ConfigError;

/// Environment variable overriding the target file name
pub const TARGET_ENV: &str = "OPEN_HERE_TARGET";

/// Project config file name, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "open-here.toml";

/// Global config path (~/.config/open-here/config.toml on Linux)
pub fn global_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("open-here")
        .join("config.toml")
}

/// Project config path for a working directory
pub fn project_config_path(working_dir: &Path) -> PathBuf {
    working_dir.join(PROJECT_CONFIG_FILE)
}

/// Load settings from the standard locations and the environment
pub fn load_settings(working_dir: Option<&Path>) -> Result<ResolvedSettings, ConfigError> {
    let project = working_dir.map(project_config_path);
    let env_target = std::env::var(TARGET_ENV).ok();
    load_settings_from(&global_config_path(), project.as_deref(), env_target)
}

/// Load settings from explicit locations
///
/// Missing files are skipped; an empty env value is ignored.
pub fn load_settings_from(
    global_path: &Path,
    project_path: Option<&Path>,
    env_target: Option<String>,
) -> Result<ResolvedSettings, ConfigError> {
    let mut resolver = SettingsResolver::new();

    if let Some(config) = Config::load(global_path)? {
        tracing::debug!(path = %global_path.display(), "Loaded global config");
        resolver.add_global(config);
    }

    if let Some(path) = project_path {
        if let Some(config) = Config::load(path)? {
            tracing::debug!(path = %path.display(), "Loaded project config");
            resolver.add_project(config);
        }
    }

    if let Some(target) = env_target.filter(|t| !t.trim().is_empty()) {
        resolver.set_env_target(target);
    }

    let resolved = resolver.resolve()?;
    tracing::debug!(
        target = %resolved.settings.target,
        source = resolved.target_source.as_str(),
        "Resolved target"
    );
    Ok(resolved)
}
