//! Addon assembly.
//!
//! # Responsibilities
//! - Load the keyword configuration on startup
//! - Wire the interceptor and reload command to the shared store
//! - Start the config watcher when enabled
//!
//! Invalid settings are rejected. A bad config file is not: it is logged and
//! the addon runs with the empty configuration until a reload succeeds.

use std::path::Path;
use std::sync::Arc;

use notify::RecommendedWatcher;

use crate::command::{CommandOutcome, ReloadCommand};
use crate::config::watcher::ConfigWatcher;
use crate::config::settings::SettingsError;
use crate::config::validation::validate_settings;
use crate::config::{ConfigStore, KeywordConfig, PluginSettings};
use crate::host::{CommandSender, ProxyHost};
use crate::kick::{KickAction, KickEvent, KickInterceptor};

/// The running addon.
pub struct KeywordKickPlugin {
    store: Arc<ConfigStore>,
    interceptor: KickInterceptor,
    command: ReloadCommand,
    _watcher: Option<RecommendedWatcher>,
}

impl KeywordKickPlugin {
    pub const ID: &'static str = "keywordkick";
    pub const NAME: &'static str = "Keyword Kick";
    pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    /// Validate settings, load configuration and wire up all components.
    pub fn start(settings: &PluginSettings, host: Arc<dyn ProxyHost>) -> Result<Self, SettingsError> {
        validate_settings(settings).map_err(SettingsError::Validation)?;

        tracing::info!(
            id = Self::ID,
            name = Self::NAME,
            version = Self::VERSION,
            data_dir = %settings.data_dir.display(),
            "Plugin starting"
        );

        let store = Arc::new(ConfigStore::open(settings.config_path()));
        let interceptor = KickInterceptor::new(store.clone(), host, settings.redirect_timeout());
        let command = ReloadCommand::new(store.clone());
        tracing::debug!(command = ReloadCommand::NAME, "Registered command");

        let watcher = if settings.watch_config {
            match ConfigWatcher::new(store.clone()).run() {
                Ok(watcher) => Some(watcher),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to start config watcher, reload with /keywordkick reload");
                    None
                }
            }
        } else {
            None
        };

        Ok(Self {
            store,
            interceptor,
            command,
            _watcher: watcher,
        })
    }

    /// Handle a player being kicked from a backend.
    pub async fn on_kicked(&self, event: KickEvent) -> KickAction {
        self.interceptor.on_kicked(event).await
    }

    /// Handle `/keywordkick <args>`.
    pub fn execute_command(&self, sender: &dyn CommandSender, args: &[&str]) -> CommandOutcome {
        self.command.execute(sender, args)
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> Arc<KeywordConfig> {
        self.store.snapshot()
    }

    pub fn config_path(&self) -> &Path {
        self.store.path()
    }

    pub fn interceptor(&self) -> &KickInterceptor {
        &self.interceptor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::ValidationError;
    use crate::host::memory::InMemoryHost;

    #[test]
    fn test_start_rejects_invalid_settings() {
        let dir = tempfile::tempdir().unwrap();
        let settings = PluginSettings {
            data_dir: dir.path().to_path_buf(),
            redirect_timeout_ms: 0,
            ..PluginSettings::default()
        };

        let err = match KeywordKickPlugin::start(&settings, Arc::new(InMemoryHost::new())) {
            Ok(_) => panic!("zero redirect timeout must be rejected"),
            Err(e) => e,
        };
        match err {
            SettingsError::Validation(errors) => assert!(matches!(
                errors.as_slice(),
                [ValidationError::RedirectTimeoutOutOfRange { actual: 0, .. }]
            )),
            other => panic!("unexpected error {:?}", other),
        }
        // Nothing was loaded or written.
        assert!(!dir.path().join("config.yml").exists());
    }

    #[test]
    fn test_start_with_valid_settings() {
        let dir = tempfile::tempdir().unwrap();
        let settings = PluginSettings {
            data_dir: dir.path().to_path_buf(),
            ..PluginSettings::default()
        };

        let plugin = KeywordKickPlugin::start(&settings, Arc::new(InMemoryHost::new())).unwrap();
        assert_eq!(*plugin.config(), KeywordConfig::default());
        assert_eq!(plugin.config_path(), dir.path().join("config.yml"));
        assert_eq!(ReloadCommand::NAME, KeywordKickPlugin::ID);
    }
}
