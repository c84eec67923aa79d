//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT → Shutdown::trigger
//!
//! Shutdown (shutdown.rs):
//!     trigger → every subscribed confirmation wait returns Cancelled
//! ```
//!
//! # Design Decisions
//! - Cancellation is observed at suspension points only (between polls)
//! - Single-shot RPC calls run to completion; only waits are cancellable

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
