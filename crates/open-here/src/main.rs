//! open-here - Open a project file with the system default application
//!
//! Joins the current directory with the target file (`go.mod` unless
//! configured otherwise) and hands it to the OS launcher:
//! - Windows: `explorer`
//! - macOS: `open`
//! - anything else: logs a notice and tries `open`
//!
//! Usage:
//!   open-here [--init | --init-global | --help]

mod config;
mod error;
mod logging;
mod opener;
mod platform;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};

use crate::opener::{report_failure, Opener};
use crate::platform::{OsTag, SystemSpawner};

/// What the command line asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Open,
    Init,
    InitGlobal,
    Help,
}

/// First recognized flag wins; unknown arguments are ignored
fn parse_args(args: impl IntoIterator<Item = String>) -> Action {
    for arg in args {
        match arg.as_str() {
            "--init" => return Action::Init,
            "--init-global" => return Action::InitGlobal,
            "--help" | "-h" => return Action::Help,
            _ => {}
        }
    }
    Action::Open
}

fn main() -> ExitCode {
    logging::init_logging();

    let working_dir = std::env::current_dir();

    match parse_args(std::env::args().skip(1)) {
        Action::Init => {
            let result = working_dir
                .as_ref()
                .map_err(|e| anyhow::anyhow!("cannot resolve working directory: {}", e))
                .and_then(|dir| write_example_config(&config::project_config_path(dir), false));
            return report_init(result);
        }
        Action::InitGlobal => {
            return report_init(write_example_config(&config::global_config_path(), true));
        }
        Action::Help => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Action::Open => {}
    }

    let resolved = match config::load_settings(working_dir.as_deref().ok()) {
        Ok(resolved) => resolved,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let opener = Opener::new(OsTag::host(), resolved.settings);
    match opener.open(working_dir, &SystemSpawner) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(&e);
            ExitCode::FAILURE
        }
    }
}

fn report_init(result: Result<PathBuf>) -> ExitCode {
    match result {
        Ok(path) => {
            println!("Created config: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Write the example config; refuses to replace an existing file unless `overwrite`
fn write_example_config(path: &Path, overwrite: bool) -> Result<PathBuf> {
    if path.exists() && !overwrite {
        bail!("Config already exists: {}", path.display());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, generate_example_config())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path.to_path_buf())
}

fn print_usage() {
    println!("Usage: open-here [OPTIONS]");
    println!();
    println!(
        "Opens ./{} with the system default application.",
        config::DEFAULT_TARGET
    );
    println!();
    println!("Options:");
    println!(
        "      --init           Create local config (./{})",
        config::PROJECT_CONFIG_FILE
    );
    println!("      --init-global    Create/reset global config");
    println!("  -h, --help           Show this help");
    println!();
    println!("Environment:");
    println!("  {}     Override the target file name", config::TARGET_ENV);
    println!("  RUST_LOG             Log filter (default: info; cwd/GOOS lines always shown)");
}

fn generate_example_config() -> String {
    format!(
        r##"# open-here configuration
# Global config: {global}
# Local override: ./{local} (in project directory)
# Environment: {env}=<file> overrides `target`

# File opened from the current directory (must be relative)
target = "{target}"

# When the OS has no dedicated launcher:
#   "fallthrough" - log a notice and try the fallback launcher
#   "abort"       - fail without spawning anything
unsupported_os = "fallthrough"

[launchers]
windows = "explorer"
darwin = "open"
fallback = "open"          # e.g. "xdg-open" on Linux
"##,
        global = config::global_config_path().display(),
        local = config::PROJECT_CONFIG_FILE,
        env = config::TARGET_ENV,
        target = config::DEFAULT_TARGET,
    )
}
