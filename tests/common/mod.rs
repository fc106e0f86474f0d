//! Shared utilities for integration tests.

use std::path::Path;
use std::sync::Arc;

use keyword_kick::host::memory::InMemoryHost;
use keyword_kick::{KeywordKickPlugin, PlayerRef, PluginSettings};
use tempfile::TempDir;
use uuid::Uuid;

/// A started plugin over a scratch data directory.
pub struct Harness {
    pub dir: TempDir,
    pub host: Arc<InMemoryHost>,
    pub plugin: KeywordKickPlugin,
}

/// Start the plugin, seeding `config.yml` with `config` when given.
pub fn start_plugin(config: Option<&str>) -> Harness {
    start_plugin_with(config, |_| {})
}

/// Like [`start_plugin`] but lets the caller adjust settings first.
pub fn start_plugin_with<F>(config: Option<&str>, adjust: F) -> Harness
where
    F: FnOnce(&mut PluginSettings),
{
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("keywordkick");
    if let Some(content) = config {
        std::fs::create_dir_all(&data_dir).unwrap();
        std::fs::write(data_dir.join("config.yml"), content).unwrap();
    }

    let mut settings = PluginSettings {
        data_dir,
        redirect_timeout_ms: 500,
        ..PluginSettings::default()
    };
    adjust(&mut settings);

    let host = Arc::new(InMemoryHost::new());
    let plugin = KeywordKickPlugin::start(&settings, host.clone()).unwrap();
    Harness { dir, host, plugin }
}

pub fn player(name: &str) -> PlayerRef {
    PlayerRef::new(Uuid::new_v4(), name)
}

/// Replace the config file in one step so readers never see a partial write.
#[allow(dead_code)]
pub fn rewrite_config(path: &Path, content: &str) {
    let tmp = path.with_extension("yml.tmp");
    std::fs::write(&tmp, content).unwrap();
    std::fs::rename(&tmp, path).unwrap();
}
