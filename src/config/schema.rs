//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.
//! Every section has defaults so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the wallet RPC client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// JSON-RPC endpoint settings.
    pub rpc: RpcConfig,

    /// Settlement polling settings.
    pub confirmation: ConfirmationConfig,

    /// Airdrop defaults.
    pub airdrop: AirdropConfig,

    /// Durable session storage.
    pub session: SessionConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// JSON-RPC endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// Node endpoint URL.
    pub endpoint: String,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Commitment level used for blockhash queries.
    pub commitment: String,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.devnet.solana.com".to_string(),
            request_timeout_secs: 30,
            commitment: "confirmed".to_string(),
        }
    }
}

/// Confirmation polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfirmationConfig {
    /// Confirmation depth the wait schedule aims for.
    pub target_depth: u64,

    /// Overall deadline for one confirmation wait, in milliseconds.
    pub deadline_ms: u64,

    /// Approximate duration of one network slot, in milliseconds.
    pub slot_interval_ms: u64,
}

impl ConfirmationConfig {
    pub fn deadline(&self) -> Duration {
        Duration::from_millis(self.deadline_ms)
    }

    pub fn slot_interval(&self) -> Duration {
        Duration::from_millis(self.slot_interval_ms)
    }
}

impl Default for ConfirmationConfig {
    fn default() -> Self {
        Self {
            target_depth: 31,
            deadline_ms: 30_000,
            slot_interval_ms: 300,
        }
    }
}

/// Airdrop configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AirdropConfig {
    /// Lamports requested when the caller does not name an amount.
    pub lamports: u64,
}

impl Default for AirdropConfig {
    fn default() -> Self {
        Self { lamports: 10_000 }
    }
}

/// Session persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// File backing the durable key-value store.
    pub store_path: String,

    /// Prefix for the persisted session fields.
    pub namespace: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_path: "wallet_session.json".to_string(),
            namespace: "wallet_session".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive, overridden by `RUST_LOG`.
    pub log_filter: String,

    /// Record metrics through the `metrics` facade.
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "solana_wallet_rpc=info".to_string(),
            metrics_enabled: true,
        }
    }
}
