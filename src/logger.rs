//! Logger initialization.
//!
//! Builds a `tracing-subscriber` pipeline from [`LoggerConfig`]: console
//! output with color control, optionally formatted as JSON.

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggerConfig;

/// Initialize the logger with the given configuration.
///
/// The configured level acts as the default directive; `RUST_LOG` style
/// directives in the level string are honored as-is.
pub fn init_logger(config: &LoggerConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.level).unwrap_or_else(|_| EnvFilter::new("info"));

    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(false).json())
            .init();
    } else {
        let use_ansi = std::io::stdout().is_terminal();
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_ansi(use_ansi)
                    .with_target(true)
                    .with_level(true),
            )
            .init();
    }

    Ok(())
}
