//! Metrics collection.
//!
//! # Metrics
//! - `keywordkick_kick_actions_total` (counter): applied actions by `action`
//! - `keywordkick_reloads_total` (counter): config loads by `result`
//! - `keywordkick_keywords` (gauge): keywords in the active configuration
//!
//! Recorded through the `metrics` facade. Without an installed recorder every
//! call is a no-op; exporting is left to the embedding proxy.

pub fn record_kick_action(action: &'static str) {
    metrics::counter!("keywordkick_kick_actions_total", "action" => action).increment(1);
}

pub fn record_reload(success: bool) {
    let result = if success { "success" } else { "failure" };
    metrics::counter!("keywordkick_reloads_total", "result" => result).increment(1);
}

pub fn record_keyword_count(count: usize) {
    metrics::gauge!("keywordkick_keywords").set(count as f64);
}
