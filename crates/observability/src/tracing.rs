//! Tracing/logging initialization.

use tracing_subscriber::EnvFilter;

/// Initialize tracing with the default `info` filter (overridable via
/// `RUST_LOG`). Safe to call multiple times.
pub fn init() {
    init_with("info");
}

/// Initialize tracing with an explicit fallback filter, used when `RUST_LOG`
/// is unset or unparseable.
pub fn init_with(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // JSON lines on stdout; timestamps included, target dropped for brevity.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false)
        .try_init();
}
