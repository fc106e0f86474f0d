//! `/keywordkick reload`.

use std::sync::Arc;

use crate::config::ConfigStore;
use crate::host::CommandSender;

/// Permission required to reload the configuration.
pub const RELOAD_PERMISSION: &str = "keywordkick.reload";

pub const NO_PERMISSION_MESSAGE: &str = "You do not have permission to execute this command.";
pub const RELOADED_MESSAGE: &str = "KeywordKick configuration reloaded!";
pub const RELOAD_FAILED_MESSAGE: &str =
    "Failed to reload configuration. Check the console for details.";
pub const USAGE_MESSAGE: &str = "Usage: /keywordkick reload";

/// Outcome of a command invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Reloaded,
    ReloadFailed,
    PermissionDenied,
    Usage,
}

/// The `keywordkick` command.
#[derive(Debug, Clone)]
pub struct ReloadCommand {
    store: Arc<ConfigStore>,
}

impl ReloadCommand {
    /// Name the command is registered under.
    pub const NAME: &'static str = "keywordkick";

    pub fn new(store: Arc<ConfigStore>) -> Self {
        Self { store }
    }

    /// Run the command. `args` excludes the command name.
    pub fn execute(&self, sender: &dyn CommandSender, args: &[&str]) -> CommandOutcome {
        tracing::info!(command = Self::NAME, sender = sender.name(), ?args, "Executing command");

        if !sender.has_permission(RELOAD_PERMISSION) {
            sender.send_message(NO_PERMISSION_MESSAGE);
            return CommandOutcome::PermissionDenied;
        }

        match args {
            [] => {}
            [sub] if sub.eq_ignore_ascii_case("reload") => {}
            _ => {
                sender.send_message(USAGE_MESSAGE);
                return CommandOutcome::Usage;
            }
        }

        match self.store.reload() {
            Ok(_) => {
                sender.send_message(RELOADED_MESSAGE);
                tracing::info!(sender = sender.name(), "Configuration reloaded successfully");
                CommandOutcome::Reloaded
            }
            Err(e) => {
                sender.send_message(RELOAD_FAILED_MESSAGE);
                tracing::error!(sender = sender.name(), error = %e, "Error reloading configuration");
                CommandOutcome::ReloadFailed
            }
        }
    }
}
