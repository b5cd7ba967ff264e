//! Settings resolution with unified priority ordering
//!
//! Priority order (later overrides earlier):
//! 1. Built-in defaults
//! 2. Global config (~/.config/open-here/config.toml)
//! 3. Project config (./open-here.toml)
//! 4. Environment variable (OPEN_HERE_TARGET)

use std::path::{Component, Path};

use super::types::{Config, Settings};
use crate::error::ConfigError;

/// Configuration source with priority ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigSource {
    Default = 0,
    Global = 1,
    Project = 2,
    Env = 3,
}

impl ConfigSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigSource::Default => "default",
            ConfigSource::Global => "global",
            ConfigSource::Project => "project",
            ConfigSource::Env => "env",
        }
    }
}

/// Settings resolver
///
/// Sources may be added in any order; a value is only replaced by one from
/// a source of equal or higher priority.
pub struct SettingsResolver {
    settings: Settings,
    target_source: ConfigSource,
    policy_source: ConfigSource,
    launcher_sources: LauncherSources,
}

/// Source of each launcher table entry
#[derive(Debug, Clone, Copy)]
struct LauncherSources {
    windows: ConfigSource,
    darwin: ConfigSource,
    fallback: ConfigSource,
}

impl Default for LauncherSources {
    fn default() -> Self {
        Self {
            windows: ConfigSource::Default,
            darwin: ConfigSource::Default,
            fallback: ConfigSource::Default,
        }
    }
}

impl SettingsResolver {
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
            target_source: ConfigSource::Default,
            policy_source: ConfigSource::Default,
            launcher_sources: LauncherSources::default(),
        }
    }

    /// Merge the global config file
    pub fn add_global(&mut self, config: Config) {
        self.add_config(config, ConfigSource::Global);
    }

    /// Merge the project config file
    pub fn add_project(&mut self, config: Config) {
        self.add_config(config, ConfigSource::Project);
    }

    /// Set the target from the environment
    pub fn set_env_target(&mut self, target: String) {
        self.set_target(target, ConfigSource::Env);
    }

    fn add_config(&mut self, config: Config, source: ConfigSource) {
        if let Some(target) = config.target {
            self.set_target(target, source);
        }

        if let Some(policy) = config.unsupported_os {
            if source >= self.policy_source {
                self.settings.unsupported_os = policy;
                self.policy_source = source;
            }
        }

        let launchers = &mut self.settings.launchers;
        let sources = &mut self.launcher_sources;
        merge_launcher(
            &mut launchers.windows,
            &mut sources.windows,
            config.launchers.windows,
            source,
        );
        merge_launcher(
            &mut launchers.darwin,
            &mut sources.darwin,
            config.launchers.darwin,
            source,
        );
        merge_launcher(
            &mut launchers.fallback,
            &mut sources.fallback,
            config.launchers.fallback,
            source,
        );
    }

    fn set_target(&mut self, target: String, source: ConfigSource) {
        if source >= self.target_source {
            self.settings.target = target;
            self.target_source = source;
        }
    }

    /// Validate and return the merged settings
    pub fn resolve(mut self) -> Result<ResolvedSettings, ConfigError> {
        let target = self.settings.target.trim().to_string();
        let path = Path::new(&target);
        let anchored = path
            .components()
            .any(|c| matches!(c, Component::Prefix(_) | Component::RootDir));
        if target.is_empty() || anchored || path.is_absolute() {
            return Err(ConfigError::InvalidTarget(self.settings.target));
        }
        self.settings.target = target;

        Ok(ResolvedSettings {
            settings: self.settings,
            target_source: self.target_source,
        })
    }
}

impl Default for SettingsResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings ready for use, with the origin of the target
#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub settings: Settings,
    pub target_source: ConfigSource,
}

fn merge_launcher(
    entry: &mut String,
    entry_source: &mut ConfigSource,
    value: Option<String>,
    source: ConfigSource,
) {
    if let Some(cmd) = value {
        if source >= *entry_source {
            *entry = expand_launcher(&cmd);
            *entry_source = source;
        }
    }
}

fn expand_launcher(cmd: &str) -> String {
    shellexpand::tilde(cmd.trim()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{LauncherOverrides, UnsupportedOs};

    fn make_config(target: Option<&str>, policy: Option<UnsupportedOs>) -> Config {
        Config {
            target: target.map(|s| s.to_string()),
            unsupported_os: policy,
            launchers: LauncherOverrides::default(),
        }
    }

    #[test]
    fn test_defaults_without_sources() {
        let resolved = SettingsResolver::new().resolve().unwrap();
        assert_eq!(resolved.settings, Settings::default());
        assert_eq!(resolved.target_source, ConfigSource::Default);
    }

    #[test]
    fn test_priority_project_overrides_global() {
        let mut resolver = SettingsResolver::new();
        resolver.add_global(make_config(Some("Cargo.toml"), Some(UnsupportedOs::Abort)));
        resolver.add_project(make_config(Some("package.json"), None));

        let resolved = resolver.resolve().unwrap();
        assert_eq!(resolved.settings.target, "package.json");
        assert_eq!(resolved.target_source, ConfigSource::Project);
        // Policy only set globally, so it survives
        assert_eq!(resolved.settings.unsupported_os, UnsupportedOs::Abort);
    }

    #[test]
    fn test_env_overrides_files_regardless_of_order() {
        let mut resolver = SettingsResolver::new();
        resolver.set_env_target("Makefile".to_string());
        resolver.add_project(make_config(Some("package.json"), None));

        let resolved = resolver.resolve().unwrap();
        assert_eq!(resolved.settings.target, "Makefile");
        assert_eq!(resolved.target_source.as_str(), "env");
    }

    #[test]
    fn test_launcher_overrides_merge() {
        let mut resolver = SettingsResolver::new();
        let mut global = Config::default();
        global.launchers.fallback = Some("xdg-open".to_string());
        global.launchers.windows = Some("start".to_string());
        resolver.add_global(global);

        let mut project = Config::default();
        project.launchers.windows = Some(" explorer.exe ".to_string());
        resolver.add_project(project);

        let launchers = resolver.resolve().unwrap().settings.launchers;
        assert_eq!(launchers.fallback, "xdg-open");
        assert_eq!(launchers.windows, "explorer.exe");
        assert_eq!(launchers.darwin, "open");
    }

    #[test]
    fn test_launcher_priority_any_order() {
        let mut resolver = SettingsResolver::new();
        let mut project = Config::default();
        project.launchers.fallback = Some("project-opener".to_string());
        resolver.add_project(project);

        let mut global = Config::default();
        global.launchers.fallback = Some("global-opener".to_string());
        global.launchers.darwin = Some("global-darwin".to_string());
        resolver.add_global(global);

        let launchers = resolver.resolve().unwrap().settings.launchers;
        assert_eq!(launchers.fallback, "project-opener");
        // Entries the project left alone still come from global
        assert_eq!(launchers.darwin, "global-darwin");
    }

    #[test]
    fn test_launcher_tilde_expanded() {
        let mut resolver = SettingsResolver::new();
        let mut config = Config::default();
        config.launchers.fallback = Some("~/bin/opener".to_string());
        resolver.add_global(config);

        let launchers = resolver.resolve().unwrap().settings.launchers;
        assert!(!launchers.fallback.starts_with('~') || dirs::home_dir().is_none());
        assert!(launchers.fallback.ends_with("bin/opener"));
    }

    #[test]
    fn test_absolute_target_rejected() {
        let mut resolver = SettingsResolver::new();
        resolver.set_env_target("/etc/passwd".to_string());
        assert!(matches!(
            resolver.resolve(),
            Err(ConfigError::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_nested_relative_target_allowed() {
        let mut resolver = SettingsResolver::new();
        resolver.set_env_target("docs/index.md".to_string());
        assert_eq!(resolver.resolve().unwrap().settings.target, "docs/index.md");
    }

    #[cfg(windows)]
    #[test]
    fn test_drive_relative_target_rejected() {
        let mut resolver = SettingsResolver::new();
        resolver.set_env_target("C:go.mod".to_string());
        assert!(matches!(
            resolver.resolve(),
            Err(ConfigError::InvalidTarget(_))
        ));

        let mut resolver = SettingsResolver::new();
        resolver.set_env_target(r"\go.mod".to_string());
        assert!(resolver.resolve().is_err());
    }

    #[test]
    fn test_empty_target_rejected() {
        let mut resolver = SettingsResolver::new();
        resolver.add_project(make_config(Some("  "), None));
        assert!(resolver.resolve().is_err());
    }
}
