//! Structured logging initialization via `tracing`.

use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber with sensible defaults.
///
/// Respects the `RUST_LOG` environment variable for filtering; falls back
/// to `info` when unset.
pub fn init_tracing() {
    init_tracing_with("info");
}

/// Initialize with an explicit default level, still overridable by
/// `RUST_LOG`.
pub fn init_tracing_with(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
