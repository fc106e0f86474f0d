//! Interfaces to the proxy runtime.
//!
//! The addon never talks to players or backends directly. Everything it needs
//! from the proxy is behind [`ProxyHost`] and [`CommandSender`], which the
//! embedding proxy implements.

pub mod memory;

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Identity of a connected player.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PlayerRef {
    pub id: Uuid,
    pub username: String,
}

impl PlayerRef {
    pub fn new(id: Uuid, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
        }
    }
}

impl fmt::Display for PlayerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.username)
    }
}

/// A backend registered with the proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerHandle {
    pub name: String,
}

impl ServerHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Why a session transfer did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The target backend rejected the player.
    #[error("transfer refused: {0}")]
    Refused(String),

    /// The target backend could not be reached.
    #[error("server unreachable: {0}")]
    Unreachable(String),
}

/// Operations the proxy runtime provides to the addon.
#[async_trait]
pub trait ProxyHost: Send + Sync {
    /// Check whether a player holds a permission.
    fn has_permission(&self, player: &PlayerRef, permission: &str) -> bool;

    /// Look up a registered backend by name.
    fn find_server(&self, name: &str) -> Option<ServerHandle>;

    /// Disconnect a player from the proxy, showing `message`.
    fn disconnect(&self, player: &PlayerRef, message: &str);

    /// Move a player to another backend and wait for the outcome.
    async fn connect(&self, player: &PlayerRef, server: &ServerHandle) -> Result<(), TransferError>;
}

/// Whoever invoked a command: a player or the console.
pub trait CommandSender: Send + Sync {
    fn name(&self) -> &str;

    fn has_permission(&self, permission: &str) -> bool;

    fn send_message(&self, message: &str);
}
