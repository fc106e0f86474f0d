//! Runtime settings for the addon itself.
//!
//! These are separate from `config.yml`: they say where the data directory
//! lives and how the addon behaves at runtime, and are read from an optional
//! TOML file. All fields have defaults so an empty file is valid.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::schema::CONFIG_FILE_NAME;
use crate::config::validation::{validate_settings, ValidationError};

/// Root runtime settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PluginSettings {
    /// Directory holding `config.yml`.
    pub data_dir: PathBuf,

    /// Upper bound on a redirect attempt, in milliseconds.
    pub redirect_timeout_ms: u64,

    /// Reload `config.yml` automatically when it changes on disk.
    pub watch_config: bool,

    /// Logging settings.
    pub logging: LoggingSettings,
}

impl PluginSettings {
    /// Full path of the keyword config file.
    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE_NAME)
    }

    /// Redirect timeout as a `Duration`.
    pub fn redirect_timeout(&self) -> Duration {
        Duration::from_millis(self.redirect_timeout_ms)
    }
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("plugins/keywordkick"),
            redirect_timeout_ms: 5_000,
            watch_config: false,
            logging: LoggingSettings::default(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error).
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Error type for settings loading.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate settings from a TOML file.
pub fn load_settings(path: &Path) -> Result<PluginSettings, SettingsError> {
    let content = fs::read_to_string(path)?;
    parse_settings(&content)
}

/// Parse and validate settings from TOML text.
pub fn parse_settings(content: &str) -> Result<PluginSettings, SettingsError> {
    let settings: PluginSettings = toml::from_str(content)?;
    validate_settings(&settings).map_err(SettingsError::Validation)?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let settings = parse_settings("").unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("plugins/keywordkick"));
        assert_eq!(settings.redirect_timeout(), Duration::from_secs(5));
        assert!(!settings.watch_config);
        assert_eq!(settings.logging.level, "info");
        assert_eq!(
            settings.config_path(),
            PathBuf::from("plugins/keywordkick").join("config.yml")
        );
    }

    #[test]
    fn test_parse_full_settings() {
        let settings = parse_settings(
            r#"
            data_dir = "/srv/proxy/keywordkick"
            redirect_timeout_ms = 1500
            watch_config = true

            [logging]
            level = "debug"
            json = true
            "#,
        )
        .unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("/srv/proxy/keywordkick"));
        assert_eq!(settings.redirect_timeout_ms, 1500);
        assert!(settings.watch_config);
        assert!(settings.logging.json);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let err = parse_settings("redirect_timeout_ms = 0").unwrap_err();
        assert!(matches!(err, SettingsError::Validation(_)));
        assert!(err.to_string().contains("redirect_timeout_ms"));

        let err = parse_settings("redirect_timeout_ms = \"fast\"").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
