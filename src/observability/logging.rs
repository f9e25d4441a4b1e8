//! Structured logging.
//!
//! Log events go to stderr so the transfer report on stdout stays readable
//! and pipeable. `RUST_LOG` overrides the configured level.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Build the filter: `RUST_LOG` if set, else `level` for this crate and
/// `warn` for dependencies.
pub fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,sepolia_transfer={}", level)))
}

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging(level: &str) {
    let result = tracing_subscriber::registry()
        .with(build_filter(level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    if result.is_err() {
        tracing::debug!("Logging already initialized");
    }
}
