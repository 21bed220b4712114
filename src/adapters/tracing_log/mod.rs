// Tracing log adapter - Structured logging using tracing crate

use tracing_subscriber::EnvFilter;

use crate::ports::{LogFormat, LogLevel};

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
/// Logs go to stderr so that tokens printed on stdout stay pipeable.
///
/// Returns false if a subscriber was already installed.
pub fn init_logging(level: LogLevel, format: LogFormat) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Json => builder.json().try_init().is_ok(),
        LogFormat::Text => builder.try_init().is_ok(),
    }
}
