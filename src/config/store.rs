//! Shared, hot-swappable configuration.
//!
//! # Responsibilities
//! - Own the path of `config.yml`
//! - Publish the current `KeywordConfig` as an immutable snapshot
//! - Replace the snapshot wholesale on reload
//!
//! Readers call [`ConfigStore::snapshot`] and keep the returned `Arc` for the
//! whole evaluation, so a concurrent reload is observed either completely or
//! not at all.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::loader::{load_config, ConfigError};
use crate::config::schema::KeywordConfig;
use crate::observability::metrics;

/// Holder of the current keyword configuration.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    current: ArcSwap<KeywordConfig>,
}

impl ConfigStore {
    /// Create a store and perform the initial load.
    ///
    /// A failed initial load is logged and leaves the empty configuration in
    /// place, which never matches.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let store = Self {
            path: path.into(),
            current: ArcSwap::from_pointee(KeywordConfig::empty()),
        };
        // Failure already logged by reload.
        let _ = store.reload();
        store
    }

    /// Create a store around an already-built configuration without touching
    /// the filesystem.
    pub fn with_config(path: impl Into<PathBuf>, config: KeywordConfig) -> Self {
        Self {
            path: path.into(),
            current: ArcSwap::from_pointee(config),
        }
    }

    /// Path of the backing config file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current configuration snapshot.
    pub fn snapshot(&self) -> Arc<KeywordConfig> {
        self.current.load_full()
    }

    /// Reload unless the file is currently empty.
    ///
    /// Editors that truncate before writing produce a change event while the
    /// file has no content; publishing that would disable every keyword until
    /// the next event. Returns `Ok(None)` when the reload was skipped.
    pub fn reload_if_nonempty(&self) -> Result<Option<Arc<KeywordConfig>>, ConfigError> {
        let len = std::fs::metadata(&self.path)
            .map(|m| m.len())
            .map_err(|source| ConfigError::Io {
                path: self.path.clone(),
                source,
            })?;
        if len == 0 {
            tracing::debug!(path = %self.path.display(), "Config file is empty, skipping reload");
            return Ok(None);
        }
        self.reload().map(Some)
    }

    /// Re-read the config file and publish the result.
    ///
    /// On failure the previous configuration stays active.
    pub fn reload(&self) -> Result<Arc<KeywordConfig>, ConfigError> {
        match load_config(&self.path) {
            Ok(config) => {
                let config = Arc::new(config);
                self.current.store(config.clone());
                metrics::record_reload(true);
                metrics::record_keyword_count(config.keywords.len());
                tracing::info!(
                    keywords = config.keywords.len(),
                    redirect_enabled = config.redirect_enabled,
                    redirect_server = %config.redirect_server,
                    "Configuration loaded"
                );
                Ok(config)
            }
            Err(e) => {
                metrics::record_reload(false);
                tracing::error!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to load configuration. Keeping current configuration."
                );
                Err(e)
            }
        }
    }
}
