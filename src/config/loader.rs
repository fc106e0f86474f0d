//! Configuration loading from disk.
//!
//! `config.yml` is a small line-oriented file. Only three kinds of lines are
//! understood; everything else is skipped so newer files stay readable by
//! older builds.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{KeywordConfig, DEFAULT_CONFIG_FILE, DEFAULT_REDIRECT_SERVER};

const KEYWORD_MARKER: &str = "  - ";
const REDIRECT_ENABLED_KEY: &str = "redirect-enabled:";
const REDIRECT_SERVER_KEY: &str = "redirect-server:";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the config file failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data directory could not be created.
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Load the configuration at `path`, writing the default file first if it
/// does not exist.
pub fn load_config(path: &Path) -> Result<KeywordConfig, ConfigError> {
    if !path.exists() {
        write_default_config(path)?;
        tracing::info!(path = %path.display(), "Created default config.yml");
    }

    read_config(path)
}

/// Read and parse an existing config file. Never creates it.
pub fn read_config(path: &Path) -> Result<KeywordConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_config(&content))
}

/// Write the default config file, creating parent directories as needed.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, DEFAULT_CONFIG_FILE).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse config file content. Never fails: unknown or malformed lines are
/// ignored.
pub fn parse_config(content: &str) -> KeywordConfig {
    let mut keywords = Vec::new();
    let mut redirect_enabled = false;
    let mut redirect_server: Option<String> = None;

    for line in content.lines() {
        if let Some(keyword) = line.strip_prefix(KEYWORD_MARKER) {
            let keyword = keyword.trim_end();
            // An empty keyword would match every reason.
            if keyword.is_empty() {
                tracing::debug!("Skipping empty keyword entry");
                continue;
            }
            keywords.push(keyword.to_string());
        } else if line.starts_with(REDIRECT_ENABLED_KEY) {
            // Exact suffix: trailing whitespace after `true` disables.
            if line.ends_with("true") {
                redirect_enabled = true;
            }
        } else if let Some(value) = line.strip_prefix(REDIRECT_SERVER_KEY) {
            if redirect_server.is_none() {
                let value = value.trim();
                if !value.is_empty() {
                    redirect_server = Some(value.to_string());
                }
            }
        } else if !line.trim().is_empty() && !line.trim_start().starts_with('#') {
            tracing::trace!(line, "Ignoring unrecognized config line");
        }
    }

    KeywordConfig {
        keywords,
        redirect_enabled,
        redirect_server: redirect_server.unwrap_or_else(|| DEFAULT_REDIRECT_SERVER.to_string()),
    }
}
