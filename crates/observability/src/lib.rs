//! Process-wide tracing/logging setup.
//!
//! Services emit structured `tracing` events; this crate owns the single
//! place where a subscriber gets installed. JSON output, level controlled by
//! `RUST_LOG` with an `info` fallback.

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the process.
///
/// Safe to call multiple times; only the first call installs a subscriber.
pub fn init() {
    init_with_default("info");
}

/// Initialize with an explicit fallback filter directive, used when
/// `RUST_LOG` is unset (e.g. `"shopadmin=debug"`).
pub fn init_with_default(directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_target(false)
        .try_init();
}
