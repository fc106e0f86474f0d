//! In-memory host for tests and offline evaluation.
//!
//! Keeps a registry of backends and player permissions in concurrent maps and
//! records every session action it is asked to perform.

use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Serialize;
use uuid::Uuid;

use crate::host::{CommandSender, PlayerRef, ProxyHost, ServerHandle, TransferError};

/// Behaviour of a registered backend when a player is sent to it.
#[derive(Debug, Clone)]
pub enum ServerBehavior {
    /// Accept transfers immediately.
    Accept,
    /// Reject transfers with the given reason.
    Refuse(String),
    /// Accept after waiting; used to exercise redirect timeouts.
    Delay(Duration),
}

/// A session action performed by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HostAction {
    Disconnected { player: String, message: String },
    Transferred { player: String, server: String },
}

/// A [`ProxyHost`] backed by in-memory maps.
#[derive(Debug, Default)]
pub struct InMemoryHost {
    servers: DashMap<String, ServerBehavior>,
    permissions: DashMap<Uuid, HashSet<String>>,
    actions: Mutex<Vec<HostAction>>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend that accepts transfers.
    pub fn add_server(&self, name: impl Into<String>) {
        self.servers.insert(name.into(), ServerBehavior::Accept);
    }

    /// Register a backend with explicit transfer behaviour.
    pub fn add_server_with(&self, name: impl Into<String>, behavior: ServerBehavior) {
        self.servers.insert(name.into(), behavior);
    }

    /// Grant a permission to a player.
    pub fn grant(&self, player: &PlayerRef, permission: impl Into<String>) {
        self.permissions
            .entry(player.id)
            .or_default()
            .insert(permission.into());
    }

    /// Actions performed so far, oldest first.
    pub fn actions(&self) -> Vec<HostAction> {
        self.actions
            .lock()
            .map(|a| a.clone())
            .unwrap_or_default()
    }

    fn record(&self, action: HostAction) {
        if let Ok(mut actions) = self.actions.lock() {
            actions.push(action);
        }
    }
}

#[async_trait]
impl ProxyHost for InMemoryHost {
    fn has_permission(&self, player: &PlayerRef, permission: &str) -> bool {
        self.permissions
            .get(&player.id)
            .map(|p| p.contains(permission))
            .unwrap_or(false)
    }

    fn find_server(&self, name: &str) -> Option<ServerHandle> {
        self.servers
            .contains_key(name)
            .then(|| ServerHandle::new(name))
    }

    fn disconnect(&self, player: &PlayerRef, message: &str) {
        self.record(HostAction::Disconnected {
            player: player.username.clone(),
            message: message.to_string(),
        });
    }

    async fn connect(&self, player: &PlayerRef, server: &ServerHandle) -> Result<(), TransferError> {
        // Clone out so no map guard is held across the await.
        let behavior = self
            .servers
            .get(&server.name)
            .map(|b| b.value().clone())
            .ok_or_else(|| TransferError::Unreachable(server.name.clone()))?;

        match behavior {
            ServerBehavior::Accept => {}
            ServerBehavior::Refuse(reason) => return Err(TransferError::Refused(reason)),
            ServerBehavior::Delay(delay) => tokio::time::sleep(delay).await,
        }

        self.record(HostAction::Transferred {
            player: player.username.clone(),
            server: server.name.clone(),
        });
        Ok(())
    }
}

/// A [`CommandSender`] that keeps the messages it receives.
#[derive(Debug)]
pub struct RecordingSender {
    name: String,
    permissions: HashSet<String>,
    messages: Mutex<Vec<String>>,
}

impl RecordingSender {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permissions: HashSet::new(),
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Builder-style permission grant.
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permissions.insert(permission.into());
        self
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_default()
    }
}

impl CommandSender for RecordingSender {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    fn send_message(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
