//! Diagnostic logging
//!
//! `tracing` events go to stderr so they never mix with session output.
//! `RUST_LOG` wins over the configured filter.

use std::io;

use tracing_subscriber::EnvFilter;

use super::config::Config;

/// Installs the global subscriber. A second call is a no-op.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}
