//! Logging initialization
//!
//! The crate itself only emits `tracing` events; embedders that do not
//! install their own subscriber can call [`init`] once at startup.

use tracing_subscriber::EnvFilter;

/// Install a formatting subscriber with the given default filter directive.
/// `RUST_LOG` takes precedence when set. Calling this more than once is a
/// no-op.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_level(true)
        .try_init();
}
