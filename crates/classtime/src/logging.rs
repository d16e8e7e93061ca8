//! Logging initialization.
//!
//! Built on `tracing` + `tracing-subscriber`; the level filter comes
//! from `RUST_LOG` (default `info`).

use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the global subscriber for a scheduler process.
///
/// # Examples
/// ```no_run
/// classtime::logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Initializes logging for tests, verbose and capture-friendly.
/// Safe to call from every test; only the first call installs.
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
