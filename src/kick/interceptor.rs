//! Kick event handling.
//!
//! # Responsibilities
//! - Read the current configuration snapshot
//! - Query bypass permission and server registry through the host
//! - Apply the decided action to the player session
//! - Bound redirect attempts and fall back to a disconnect on failure

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::config::ConfigStore;
use crate::host::{PlayerRef, ProxyHost, ServerHandle, TransferError};
use crate::kick::decision::{evaluate, DecisionReason, KickAction, KickDecision, KickEvent};
use crate::observability::metrics;

/// Permission that exempts a player from keyword checks.
pub const BYPASS_PERMISSION: &str = "keywordkick.bypass";

/// Shown when a redirect was attempted but did not complete.
pub const REDIRECT_FAILED_MESSAGE: &str = "You have been disconnected.";

/// Why a redirect did not happen.
#[derive(Debug, Error)]
pub enum RedirectError {
    #[error("redirect server '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Transport(#[from] TransferError),

    #[error("redirect timed out after {0:?}")]
    TimedOut(Duration),
}

/// Handles kick events from the proxy.
#[derive(Clone)]
pub struct KickInterceptor {
    store: Arc<ConfigStore>,
    host: Arc<dyn ProxyHost>,
    redirect_timeout: Duration,
}

impl KickInterceptor {
    pub fn new(store: Arc<ConfigStore>, host: Arc<dyn ProxyHost>, redirect_timeout: Duration) -> Self {
        Self {
            store,
            host,
            redirect_timeout,
        }
    }

    /// Handle a kick and return the action that was applied.
    pub async fn on_kicked(&self, event: KickEvent) -> KickAction {
        let config = self.store.snapshot();
        let player = &event.player;
        let bypass = self.host.has_permission(player, BYPASS_PERMISSION);

        let decision = evaluate(&event, bypass, &config, |name| self.host.find_server(name));
        let applied = self.apply(player, &config.redirect_server, decision).await;

        metrics::record_kick_action(applied.label());
        applied
    }

    async fn apply(&self, player: &PlayerRef, redirect_server: &str, decision: KickDecision) -> KickAction {
        let keyword = decision.keyword.as_deref().unwrap_or_default();

        match (decision.reason, decision.action) {
            (DecisionReason::Bypass, KickAction::NoOp) => {
                tracing::info!(player = %player, "Player has bypass permission, skipping keyword checks");
                KickAction::NoOp
            }
            (DecisionReason::NoKickReason, KickAction::NoOp) => {
                tracing::debug!(player = %player, "Kick has no reason, ignoring");
                KickAction::NoOp
            }
            (DecisionReason::NoMatch, KickAction::NoOp) => {
                tracing::debug!(player = %player, "No keyword matched kick reason");
                KickAction::NoOp
            }
            (DecisionReason::RedirectDisabled, KickAction::Disconnect { reason }) => {
                self.host.disconnect(player, &reason);
                tracing::info!(player = %player, keyword, "Player disconnected due to keyword match");
                KickAction::Disconnect { reason }
            }
            (DecisionReason::ServerNotFound, KickAction::DisconnectWithMessage { message }) => {
                let error = RedirectError::NotFound(redirect_server.to_string());
                tracing::error!(player = %player, keyword, error = %error, "Redirect failed, disconnecting player");
                self.host.disconnect(player, &message);
                KickAction::DisconnectWithMessage { message }
            }
            (DecisionReason::Redirect, KickAction::RedirectTo { server }) => {
                match self.redirect(player, &server).await {
                    Ok(()) => {
                        tracing::info!(
                            player = %player,
                            server = %server.name,
                            keyword,
                            "Player redirected due to keyword match"
                        );
                        KickAction::RedirectTo { server }
                    }
                    Err(error) => {
                        tracing::warn!(
                            player = %player,
                            server = %server.name,
                            keyword,
                            error = %error,
                            "Redirect failed, disconnecting player"
                        );
                        self.host.disconnect(player, REDIRECT_FAILED_MESSAGE);
                        KickAction::DisconnectWithMessage {
                            message: REDIRECT_FAILED_MESSAGE.to_string(),
                        }
                    }
                }
            }
            (reason, action) => {
                tracing::error!(
                    player = %player,
                    ?reason,
                    action = action.label(),
                    "Inconsistent kick decision, leaving kick unmodified"
                );
                KickAction::NoOp
            }
        }
    }

    async fn redirect(&self, player: &PlayerRef, server: &ServerHandle) -> Result<(), RedirectError> {
        tokio::time::timeout(self.redirect_timeout, self.host.connect(player, server))
            .await
            .map_err(|_| RedirectError::TimedOut(self.redirect_timeout))??;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeywordConfig;
    use crate::host::memory::{HostAction, InMemoryHost, ServerBehavior};
    use uuid::Uuid;

    fn setup(config: KeywordConfig) -> (Arc<InMemoryHost>, KickInterceptor) {
        let host = Arc::new(InMemoryHost::new());
        let store = Arc::new(ConfigStore::with_config("config.yml", config));
        let interceptor = KickInterceptor::new(store, host.clone(), Duration::from_millis(200));
        (host, interceptor)
    }

    fn redirecting() -> KeywordConfig {
        KeywordConfig {
            redirect_enabled: true,
            ..KeywordConfig::default()
        }
    }

    fn kick(reason: &str) -> KickEvent {
        KickEvent::new(PlayerRef::new(Uuid::new_v4(), "Steve"), Some(reason.to_string()))
    }

    #[tokio::test]
    async fn test_disconnect_with_original_reason() {
        let (host, interceptor) = setup(KeywordConfig::default());
        let action = interceptor.on_kicked(kick("You were banned for cheating")).await;

        assert_eq!(
            action,
            KickAction::Disconnect {
                reason: "You were banned for cheating".into()
            }
        );
        assert_eq!(
            host.actions(),
            vec![HostAction::Disconnected {
                player: "Steve".into(),
                message: "You were banned for cheating".into(),
            }]
        );
    }

    #[tokio::test]
    async fn test_redirect_success() {
        let (host, interceptor) = setup(redirecting());
        host.add_server("lobby");

        let action = interceptor.on_kicked(kick("AFK'd too long")).await;
        assert_eq!(
            action,
            KickAction::RedirectTo {
                server: ServerHandle::new("lobby")
            }
        );
        assert_eq!(
            host.actions(),
            vec![HostAction::Transferred {
                player: "Steve".into(),
                server: "lobby".into(),
            }]
        );
    }

    #[tokio::test]
    async fn test_missing_server_disconnects() {
        let (host, interceptor) = setup(redirecting());

        let action = interceptor.on_kicked(kick("AFK'd too long")).await;
        assert_eq!(
            action,
            KickAction::DisconnectWithMessage {
                message: crate::kick::decision::SERVER_NOT_FOUND_MESSAGE.into()
            }
        );
        assert_eq!(host.actions().len(), 1);
    }

    #[tokio::test]
    async fn test_refused_transfer_falls_back() {
        let (host, interceptor) = setup(redirecting());
        host.add_server_with("lobby", ServerBehavior::Refuse("full".into()));

        let action = interceptor.on_kicked(kick("banned")).await;
        assert_eq!(
            action,
            KickAction::DisconnectWithMessage {
                message: REDIRECT_FAILED_MESSAGE.into()
            }
        );
        assert_eq!(
            host.actions(),
            vec![HostAction::Disconnected {
                player: "Steve".into(),
                message: REDIRECT_FAILED_MESSAGE.into(),
            }]
        );
    }

    #[tokio::test]
    async fn test_slow_transfer_times_out() {
        let (host, interceptor) = setup(redirecting());
        host.add_server_with("lobby", ServerBehavior::Delay(Duration::from_secs(30)));

        let action = interceptor.on_kicked(kick("cheating")).await;
        assert_eq!(action.label(), "disconnect_with_message");
        assert!(!host
            .actions()
            .iter()
            .any(|a| matches!(a, HostAction::Transferred { .. })));
    }

    #[tokio::test]
    async fn test_bypass_and_unmatched_leave_kick_alone() {
        let (host, interceptor) = setup(redirecting());
        host.add_server("lobby");

        let event = kick("banned");
        host.grant(&event.player, BYPASS_PERMISSION);
        assert_eq!(interceptor.on_kicked(event.clone()).await, KickAction::NoOp);
        assert_eq!(interceptor.on_kicked(event).await, KickAction::NoOp);

        assert_eq!(interceptor.on_kicked(kick("Server restarting")).await, KickAction::NoOp);
        let silent = KickEvent::new(PlayerRef::new(Uuid::new_v4(), "Alex"), None);
        assert_eq!(interceptor.on_kicked(silent).await, KickAction::NoOp);

        assert!(host.actions().is_empty());
    }

    #[tokio::test]
    async fn test_mismatched_decision_is_not_applied() {
        let (host, interceptor) = setup(redirecting());
        host.add_server("lobby");
        let player = PlayerRef::new(Uuid::new_v4(), "Steve");

        let decision = KickDecision {
            action: KickAction::DisconnectWithMessage {
                message: "bogus".into(),
            },
            keyword: Some("banned".into()),
            reason: DecisionReason::Redirect,
        };
        let action = interceptor.apply(&player, "lobby", decision).await;

        assert_eq!(action, KickAction::NoOp);
        assert!(host.actions().is_empty());
    }
}
