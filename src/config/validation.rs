//! Settings validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts bounded, paths present)
//!
//! Returns all validation errors, not just the first.

use thiserror::Error;

use crate::config::settings::PluginSettings;

/// Longest redirect attempt accepted, in milliseconds.
pub const MAX_REDIRECT_TIMEOUT_MS: u64 = 60_000;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("data_dir must not be empty")]
    EmptyDataDir,

    #[error("redirect_timeout_ms must be between 1 and {max}, got {actual}")]
    RedirectTimeoutOutOfRange { actual: u64, max: u64 },

    #[error("unknown log level '{0}'")]
    UnknownLogLevel(String),
}

/// Check settings for semantic errors.
pub fn validate_settings(settings: &PluginSettings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if settings.data_dir.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyDataDir);
    }

    if settings.redirect_timeout_ms == 0 || settings.redirect_timeout_ms > MAX_REDIRECT_TIMEOUT_MS {
        errors.push(ValidationError::RedirectTimeoutOutOfRange {
            actual: settings.redirect_timeout_ms,
            max: MAX_REDIRECT_TIMEOUT_MS,
        });
    }

    let level = settings.logging.level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(settings.logging.level.clone()));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
