//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Confirmation wait:
//!     → poll getSignatureStatuses
//!     → not finalized: backoff.rs (slot-based wait)
//!     → deadline reached: TimedOut
//! ```
//!
//! # Design Decisions
//! - Only "not yet finalized" is retried; transport and RPC failures are terminal
//! - Wait constants are tunable through ConfirmationConfig

pub mod backoff;
