//! Tracing subscriber setup for scenario runs.

use tracing_subscriber::{fmt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "demobank_e2e=info";

/// Install the global subscriber.
///
/// Honours `RUST_LOG`; `DEMOBANK_LOG_JSON=1` switches to JSON lines. Safe to
/// call from every test, only the first call installs anything.
pub fn init_tracing() {
    let json = std::env::var("DEMOBANK_LOG_JSON").is_ok_and(|v| v == "1");
    init_tracing_with(DEFAULT_FILTER, json);
}

/// Install the global subscriber with an explicit fallback filter.
///
/// Returns false when a subscriber was already installed.
pub fn init_tracing_with(fallback: &str, json: bool) -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let builder = fmt().with_env_filter(filter).with_test_writer();
    if json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    }
}
