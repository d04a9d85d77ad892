#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! Logging setup for the generator.
//!
//! Standard output carries the encoded response back to the host compiler, so every
//! diagnostic goes to stderr. The level is taken from the plugin parameters; the
//! environment is not consulted.

use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Level used before the plugin parameters have been read
pub const DEFAULT_LEVEL: &str = "warn";

/// Build the filter for `level`, falling back to [`DEFAULT_LEVEL`] on a bad directive.
pub fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Install the global stderr subscriber.
///
/// Returns `false` when a subscriber is already installed (a second call, or a test
/// harness that set its own); the existing one is left in place.
pub fn init(level: &str) -> bool {
    tracing_subscriber::registry()
        .with(filter_for(level))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init()
        .is_ok()
}
