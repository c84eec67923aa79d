//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! rpc / blockchain / session produce:
//!     → logging.rs (structured tracing events)
//!     → metrics.rs (counters, gauges, histograms)
//! ```
//!
//! # Design Decisions
//! - Every RPC call logs method and request id
//! - Auth tokens are never logged
//! - Metrics are facade-only; exporting is the embedder's choice

pub mod logging;
pub mod metrics;
