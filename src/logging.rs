//! Tracing setup: human-readable stderr output, filtered by `RUST_LOG`.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global subscriber. Defaults to `info` when `RUST_LOG` is
/// unset.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
