//! Configuration file watcher for hot reload.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::config::store::ConfigStore;

/// A watcher that reloads the store when `config.yml` changes.
///
/// The data directory is watched rather than the file so editors that
/// replace the file on save are still seen.
pub struct ConfigWatcher {
    store: Arc<ConfigStore>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher for the given store.
    pub fn new(store: Arc<ConfigStore>) -> Self {
        Self { store }
    }

    /// Start watching in a background thread.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let store = self.store.clone();
        let file_name = store.path().file_name().map(|n| n.to_os_string());
        let watch_dir = match store.path().parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if !(event.kind.is_modify() || event.kind.is_create()) {
                        return;
                    }
                    let touches_config = event
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                    if touches_config {
                        tracing::info!("Config file change detected, reloading...");
                        // The current config stays active on any error.
                        if let Err(e) = store.reload_if_nonempty() {
                            tracing::debug!(error = %e, "Watcher reload failed");
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = %self.store.path().display(), "Config watcher started");
        Ok(watcher)
    }
}
