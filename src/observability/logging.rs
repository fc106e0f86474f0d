//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Pick plain or JSON output
//!
//! `RUST_LOG` overrides the configured level when set.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingSettings;

/// Build the filter directive for a configured level.
pub fn filter_directive(settings: &LoggingSettings) -> String {
    format!("keyword_kick={},keywordkick_cli={}", settings.level, settings.level)
}

/// Install the global subscriber.
///
/// Fails if one is already installed, e.g. by the embedding proxy.
pub fn init_logging(settings: &LoggingSettings) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(settings)));

    let json = settings.json.then(|| tracing_subscriber::fmt::layer().json());
    let plain = (!settings.json).then(tracing_subscriber::fmt::layer);

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(plain)
        .try_init()
}
