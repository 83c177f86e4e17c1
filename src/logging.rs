//! Tracing subscriber setup for binaries and tests that drive the iterator.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,repo_harvester=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG`.
///
/// # Errors
///
/// Returns `Err` if a global subscriber is already set.
pub fn try_init_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
}

/// Like [`try_init_logging`], but keeps an existing subscriber in place.
pub fn init_logging() {
    if try_init_logging().is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
