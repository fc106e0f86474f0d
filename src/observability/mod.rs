//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config store, interceptor, command produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, gauges via the metrics facade)
//! ```

pub mod logging;
pub mod metrics;
