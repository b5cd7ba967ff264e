//! Log setup
//!
//! The cwd, `GOOS`, unsupported-OS and fatal lines are emitted under
//! [`DIAGNOSTICS`], which stays enabled at `info` whatever `RUST_LOG` says.

use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// Target for the fixed diagnostic lines
pub const DIAGNOSTICS: &str = "open_here::diagnostics";

pub fn init_logging() {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(with_diagnostics(base))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Add the always-on diagnostics directive to a filter
pub fn with_diagnostics(filter: EnvFilter) -> EnvFilter {
    match format!("{}=info", DIAGNOSTICS).parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

#[cfg(test)]
pub use capture::LogBuffer;
