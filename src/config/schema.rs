//! Configuration schema definitions.
//!
//! `KeywordConfig` is the in-memory form of `config.yml`. It is built once per
//! load and never mutated afterwards; reloads publish a fresh value.

use serde::Serialize;

/// File name of the keyword configuration inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.yml";

/// Fallback server used when `redirect-server` is absent or empty.
pub const DEFAULT_REDIRECT_SERVER: &str = "lobby";

/// Keywords written to a freshly created config file.
pub const DEFAULT_KEYWORDS: [&str; 3] = ["banned", "cheating", "AFK'd"];

/// Content written when no config file exists yet.
pub const DEFAULT_CONFIG_FILE: &str = "\
# List of keywords that trigger an action
keywords:
  - banned
  - cheating
  - AFK'd

# Set whether players should be redirected instead of being kicked
redirect-enabled: false
# The server to redirect players to when kicked
redirect-server: lobby
";

/// Keyword matching configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordConfig {
    /// Keywords in priority order. Matching is case-insensitive and the
    /// first keyword found in the kick reason wins.
    pub keywords: Vec<String>,

    /// Redirect matched players instead of disconnecting them.
    pub redirect_enabled: bool,

    /// Backend to redirect matched players to.
    pub redirect_server: String,
}

impl KeywordConfig {
    /// A configuration that never matches anything.
    ///
    /// Used before the first successful load.
    pub fn empty() -> Self {
        Self {
            keywords: Vec::new(),
            redirect_enabled: false,
            redirect_server: DEFAULT_REDIRECT_SERVER.to_string(),
        }
    }
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            redirect_enabled: false,
            redirect_server: DEFAULT_REDIRECT_SERVER.to_string(),
        }
    }
}
