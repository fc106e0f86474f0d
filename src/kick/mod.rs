//! Kick interception subsystem.
//!
//! # Data Flow
//! ```text
//! KickEvent from host
//!     → interceptor.rs (snapshot config, query bypass)
//!     → decision.rs (pure evaluation)
//!         → matcher.rs (first keyword contained in reason)
//!     → interceptor.rs applies action via ProxyHost
//!         (disconnect, or bounded redirect with disconnect fallback)
//! ```

pub mod decision;
pub mod interceptor;
pub mod matcher;

pub use decision::{evaluate, KickAction, KickDecision, KickEvent};
pub use interceptor::{KickInterceptor, BYPASS_PERMISSION};
