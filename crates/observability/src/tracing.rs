//! Tracing/logging initialization.
//!
//! JSON-formatted events so ledger operations (completed movements,
//! conditional-update conflicts, compensations) land in a log pipeline
//! as structured records.

use tracing_subscriber::EnvFilter;

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    install(filter);
}

/// Initialize with explicit filter directives, ignoring the environment.
/// Useful in tests that want a quiet or verbose run regardless of RUST_LOG.
pub fn init_with_filter(directives: &str) {
    install(EnvFilter::new(directives));
}

fn install(filter: EnvFilter) {
    // JSON logs + timestamps; repeated installs are no-ops.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
