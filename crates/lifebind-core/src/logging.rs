//! JSON log output for production hosts.
//!
//! Enabled by the `tracing-json` feature. The filter is read from
//! `LIFEBIND_LOG` using `EnvFilter` directive syntax and falls back to
//! `info` when the variable is unset or invalid.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "LIFEBIND_LOG";

const DEFAULT_FILTER: &str = "info";

/// Build the filter from [`LOG_ENV`], falling back to `info`.
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a global JSON subscriber.
///
/// Returns `false` if a global subscriber was already set.
pub fn install_json_subscriber() -> bool {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().json().with_current_span(true))
        .try_init()
        .is_ok()
}
