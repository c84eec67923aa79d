//! Metrics collection.
//!
//! # Metrics
//! - `wallet_rpc_requests_total` (counter): RPC calls by method, outcome
//! - `wallet_rpc_request_duration_seconds` (histogram): RPC latency by method
//! - `wallet_confirmation_polls_total` (counter): confirmation waits by outcome
//! - `wallet_session_connected` (gauge): 1=connected, 0=not connected
//!
//! Recording goes through the `metrics` facade and is a no-op until the
//! embedding application installs a recorder.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use metrics::{counter, gauge, histogram};

static ENABLED: AtomicBool = AtomicBool::new(true);

/// Turn recording on or off process-wide.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Record one JSON-RPC call.
pub fn record_rpc_request(method: &str, outcome: &'static str, elapsed: Duration) {
    if !is_enabled() {
        return;
    }
    counter!(
        "wallet_rpc_requests_total",
        "method" => method.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    histogram!("wallet_rpc_request_duration_seconds", "method" => method.to_string())
        .record(elapsed.as_secs_f64());
}

/// Record the end of a confirmation wait.
pub fn record_confirmation(outcome: &'static str, polls: u32) {
    if !is_enabled() {
        return;
    }
    counter!("wallet_confirmation_polls_total", "outcome" => outcome).increment(polls as u64);
}

/// Record the current session state.
pub fn record_session_connected(connected: bool) {
    if !is_enabled() {
        return;
    }
    gauge!("wallet_session_connected").set(if connected { 1.0 } else { 0.0 });
}
