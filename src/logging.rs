//! Diagnostic logging for the binary.
//!
//! Library code only emits `tracing` events; the binary installs the
//! subscriber once at startup. Output goes to stderr so stdout stays clean
//! HTML.

use tracing_subscriber::{filter::EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when the configured directive does not parse.
const FALLBACK_FILTER: &str = "warn";

/// Build the filter from a directive such as `warn` or `chatmark=debug`.
///
/// An unparsable directive falls back to `warn` and reports whether it did.
pub fn build_filter(directive: &str) -> (EnvFilter, bool) {
    match EnvFilter::try_new(directive) {
        Ok(filter) => (filter, false),
        Err(_) => (EnvFilter::new(FALLBACK_FILTER), true),
    }
}

/// Install the global stderr subscriber. Later calls are no-ops.
pub fn init_logging(directive: &str) {
    let (filter, fell_back) = build_filter(directive);
    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .is_ok();
    if installed && fell_back {
        tracing::warn!(directive, "invalid log filter, using `{FALLBACK_FILTER}`");
    }
}
