//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config.yml (line-oriented keyword file)
//!     → loader.rs (create default if missing, parse lines)
//!     → KeywordConfig (immutable)
//!     → store.rs publishes it as an Arc snapshot
//!
//! On reload (command or watcher.rs):
//!     → loader.rs loads new config
//!     → atomic swap of Arc<KeywordConfig>
//!     → on failure the previous snapshot stays
//!
//! settings.toml (optional)
//!     → settings.rs (serde + toml)
//!     → validation.rs (semantic checks)
//!     → PluginSettings
//! ```

pub mod loader;
pub mod schema;
pub mod settings;
pub mod store;
pub mod validation;
pub mod watcher;

pub use loader::ConfigError;
pub use schema::KeywordConfig;
pub use settings::{LoggingSettings, PluginSettings};
pub use store::ConfigStore;
