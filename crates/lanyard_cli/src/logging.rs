//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::cli::LogLevel;

/// Installs a stderr `fmt` subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `level` applies to every target.
/// Installing twice (as tests may) is not an error.
pub fn init(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_directive()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
