//! Pure kick evaluation.
//!
//! Turns a kick event, the player's bypass status and a configuration
//! snapshot into the action to take. No I/O happens here; the server
//! registry is consulted through a lookup closure.

use serde::Serialize;

use crate::config::KeywordConfig;
use crate::host::{PlayerRef, ServerHandle};
use crate::kick::matcher::first_match;

/// Shown when the redirect target is not registered with the proxy.
pub const SERVER_NOT_FOUND_MESSAGE: &str = "Server not found. Please contact an administrator.";

/// A player was kicked from a backend.
#[derive(Debug, Clone)]
pub struct KickEvent {
    pub player: PlayerRef,
    /// Kick reason sent by the backend, if any.
    pub reason: Option<String>,
}

impl KickEvent {
    pub fn new(player: PlayerRef, reason: Option<String>) -> Self {
        Self { player, reason }
    }
}

/// What to do with a kicked player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum KickAction {
    /// Leave the kick alone.
    NoOp,
    /// Disconnect from the proxy with the original kick reason.
    Disconnect { reason: String },
    /// Send the player to another backend.
    RedirectTo { server: ServerHandle },
    /// Disconnect from the proxy with a notice of our own.
    DisconnectWithMessage { message: String },
}

impl KickAction {
    /// Short label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            KickAction::NoOp => "noop",
            KickAction::Disconnect { .. } => "disconnect",
            KickAction::RedirectTo { .. } => "redirect",
            KickAction::DisconnectWithMessage { .. } => "disconnect_with_message",
        }
    }
}

/// Result of evaluating a kick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KickDecision {
    pub action: KickAction,
    /// Keyword that triggered the action, if any.
    pub keyword: Option<String>,
    pub reason: DecisionReason,
}

/// Which branch of the evaluation produced the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
    Bypass,
    NoKickReason,
    NoMatch,
    RedirectDisabled,
    Redirect,
    ServerNotFound,
}

impl KickDecision {
    fn pass(reason: DecisionReason) -> Self {
        Self {
            action: KickAction::NoOp,
            keyword: None,
            reason,
        }
    }
}

/// Decide what to do with a kicked player.
///
/// `find_server` is only called when a keyword matched and redirects are
/// enabled.
pub fn evaluate<F>(
    event: &KickEvent,
    bypass: bool,
    config: &KeywordConfig,
    find_server: F,
) -> KickDecision
where
    F: FnOnce(&str) -> Option<ServerHandle>,
{
    if bypass {
        return KickDecision::pass(DecisionReason::Bypass);
    }

    let Some(reason) = event.reason.as_deref() else {
        return KickDecision::pass(DecisionReason::NoKickReason);
    };

    let Some(keyword) = first_match(&config.keywords, reason) else {
        return KickDecision::pass(DecisionReason::NoMatch);
    };
    let keyword = Some(keyword.to_string());

    if !config.redirect_enabled {
        return KickDecision {
            action: KickAction::Disconnect {
                reason: reason.to_string(),
            },
            keyword,
            reason: DecisionReason::RedirectDisabled,
        };
    }

    match find_server(&config.redirect_server) {
        Some(server) => KickDecision {
            action: KickAction::RedirectTo { server },
            keyword,
            reason: DecisionReason::Redirect,
        },
        None => KickDecision {
            action: KickAction::DisconnectWithMessage {
                message: SERVER_NOT_FOUND_MESSAGE.to_string(),
            },
            keyword,
            reason: DecisionReason::ServerNotFound,
        },
    }
}
