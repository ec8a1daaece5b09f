//! Structured logging setup.

use tracing_subscriber::EnvFilter;

/// Initialize a formatted `tracing` subscriber.
///
/// The `RUST_LOG` environment variable overrides `default_level`. Safe
/// to call more than once; later calls keep the first subscriber.
pub fn init(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
