//! Tracing setup: structured logging with span definitions.

pub mod spans;

use std::sync::Once;

use curator_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log level.
pub const LOG_ENV: &str = "CURATOR_LOG";

static INIT: Once = Once::new();

/// Build the filter for `config`, preferring [`LOG_ENV`] when it is set and valid.
pub fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

/// Install the global subscriber.
///
/// Idempotent: only the first call installs anything. A subscriber already
/// installed by the host is left in place.
pub fn init(config: &ObservabilityConfig) {
    INIT.call_once(|| {
        let filter = env_filter(config);
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);
        // try_init fails only when another global subscriber exists.
        let _ = if config.json {
            builder.json().try_init()
        } else {
            builder.try_init()
        };
    });
}

/// Install a subscriber with a custom filter string (for testing or embedding).
pub fn init_with_filter(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .with_test_writer()
        .try_init();
}
