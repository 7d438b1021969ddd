//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to `default_directive`
/// (usually `"info"`). Call once, early in `main`.
pub fn init_logging(default_directive: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .init();
}
