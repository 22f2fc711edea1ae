//! Tracing and logging setup.
//!
//! Logs go to stderr so they never interleave with the menu and summary text
//! written to stdout. `RUST_LOG` directives are honoured on top of the
//! configured level.

use anyhow::Result;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Build the env filter for the configured level
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("bread_planner={}", config.level.trim().to_lowercase()).parse()?);
    Ok(filter)
}

/// Initialize structured logging
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = build_filter(config)?;

    let installed = match config.format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .without_time(),
            )
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init(),
    };

    if installed.is_ok() {
        tracing::info!(
            log_level = %config.level,
            log_format = %config.format,
            "Tracing initialized with structured logging"
        );
    }
    Ok(())
}
