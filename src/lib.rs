//! Keyword-based kick interception for game proxies.
//!
//! When a backend kicks a player, the kick reason is checked against a list
//! of keywords from `config.yml`. On a match the player is either sent to a
//! fallback server or disconnected with the original reason.
//!
//! # Architecture Overview
//!
//! ```text
//!   proxy runtime                        keyword-kick
//!  ┌──────────────┐   KickEvent    ┌──────────────────────────────┐
//!  │ kick events  │───────────────▶│ kick::KickInterceptor        │
//!  │              │◀───────────────│   └─ kick::evaluate (pure)   │
//!  │ ProxyHost    │  disconnect /  │        reads snapshot of     │
//!  │  (permission,│  connect       │ config::ConfigStore (arc-swap)│
//!  │   registry)  │                │        ▲            ▲        │
//!  │              │  /keywordkick  │        │ reload     │ reload │
//!  │ commands     │───────────────▶│ command::ReloadCommand  config::watcher
//!  └──────────────┘                └──────────────────────────────┘
//! ```

pub mod command;
pub mod config;
pub mod host;
pub mod kick;
pub mod observability;
pub mod plugin;

pub use config::{ConfigStore, KeywordConfig, PluginSettings};
pub use host::{CommandSender, PlayerRef, ProxyHost, ServerHandle};
pub use kick::{KickAction, KickEvent, KickInterceptor};
pub use plugin::KeywordKickPlugin;
