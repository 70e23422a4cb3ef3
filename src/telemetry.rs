//! Logging initialisation.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber writing to stderr.
///
/// # Arguments
///
/// - `log_level` - `EnvFilter` directives, e.g. `info` or `pageview_report=debug,tower_http=info`
/// - `log_format` - `json` for structured output, anything else for human-readable text
///
/// # Errors
///
/// Returns an error if the filter is malformed or a subscriber is already installed.
pub fn init(log_level: &str, log_format: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("Invalid log level filter")?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if log_format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}
