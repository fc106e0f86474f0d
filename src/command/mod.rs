//! Administrative commands.
//!
//! The proxy dispatches `/keywordkick ...` here; permission checks and replies
//! go through [`crate::host::CommandSender`].

pub mod reload;

pub use reload::{CommandOutcome, ReloadCommand, RELOAD_PERMISSION};
