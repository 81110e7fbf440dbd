//! Tracing setup
//!
//! stdout carries the MCP protocol, so all log output goes to stderr.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive that overrides the config
pub const LOG_ENV_VAR: &str = "QUOTEBOOK_LOG";

/// Install the global tracing subscriber
///
/// # Arguments
/// * `default_level` - Filter directive used when `QUOTEBOOK_LOG` is unset or invalid
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .try_init();

    if let Err(e) = result {
        eprintln!("Warning: tracing was already initialized: {}", e);
    }
}
