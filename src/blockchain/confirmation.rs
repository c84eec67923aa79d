//! Settlement polling for submitted transactions.
//!
//! # States
//! ```text
//! Pending → Finalized       confirmationStatus == "finalized"
//! Pending → SignatureError  status entry carries a non-null err (terminal)
//! Pending → TimedOut        deadline passed while still pending
//! ```
//!
//! An on-chain error is checked before anything else on every poll and is
//! never retried. RPC and transport failures end the wait immediately. A
//! timeout is an outcome, not an error: the caller decides what it means.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tokio::time::{sleep, Instant};

use crate::blockchain::types::SignatureStatus;
use crate::config::ConfirmationConfig;
use crate::error::{ClientError, ClientResult};
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::resilience::backoff::slot_wait;
use crate::rpc::{RpcClient, RpcTransport};

/// Final state of a confirmation wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    /// The node reported the transaction as finalized.
    Finalized { polls: u32 },
    /// The deadline passed before finality was observed.
    TimedOut { polls: u32 },
}

impl ConfirmationOutcome {
    pub fn is_finalized(&self) -> bool {
        matches!(self, ConfirmationOutcome::Finalized { .. })
    }

    pub fn polls(&self) -> u32 {
        match self {
            ConfirmationOutcome::Finalized { polls } | ConfirmationOutcome::TimedOut { polls } => *polls,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SignatureStatusesResponse {
    value: Vec<Option<SignatureStatus>>,
}

/// Polls `getSignatureStatuses` until finality, failure or deadline.
#[derive(Debug, Clone)]
pub struct ConfirmationPoller {
    target_depth: u64,
    deadline: Duration,
    slot_interval: Duration,
    shutdown: Option<Shutdown>,
}

impl ConfirmationPoller {
    pub fn new(config: &ConfirmationConfig) -> Self {
        Self {
            target_depth: config.target_depth,
            deadline: config.deadline(),
            slot_interval: config.slot_interval(),
            shutdown: None,
        }
    }

    /// Abandon waits with `ClientError::Cancelled` when `shutdown` triggers.
    pub fn with_cancellation(mut self, shutdown: &Shutdown) -> Self {
        self.shutdown = Some(shutdown.clone());
        self
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Boolean form of [`wait_for_finality`](Self::wait_for_finality): `false`
    /// on timeout.
    pub async fn is_finalized<T: RpcTransport>(&self, rpc: &RpcClient<T>, signature: &str) -> ClientResult<bool> {
        Ok(self.wait_for_finality(rpc, signature).await?.is_finalized())
    }

    /// Wait until `signature` is finalized or the deadline passes.
    pub async fn wait_for_finality<T: RpcTransport>(
        &self,
        rpc: &RpcClient<T>,
        signature: &str,
    ) -> ClientResult<ConfirmationOutcome> {
        let started = Instant::now();
        let mut cancel = self.shutdown.as_ref().map(Shutdown::subscribe);
        let mut polls = 0u32;

        loop {
            polls += 1;
            let status = match poll_status(rpc, signature).await {
                Ok(status) => status,
                Err(e) => {
                    metrics::record_confirmation("error", polls);
                    return Err(e);
                }
            };

            let confirmations = status.as_ref().and_then(|s| s.confirmations).unwrap_or(0);
            if status.as_ref().is_some_and(SignatureStatus::is_finalized) {
                tracing::info!(signature, polls, elapsed_ms = started.elapsed().as_millis() as u64, "Transaction finalized");
                metrics::record_confirmation("finalized", polls);
                return Ok(ConfirmationOutcome::Finalized { polls });
            }

            // Never spin: at least one slot between polls even at full depth.
            // Never sleep past the deadline either.
            let remaining = self.deadline.saturating_sub(started.elapsed());
            let wait = slot_wait(self.target_depth, confirmations, self.slot_interval)
                .max(self.slot_interval)
                .min(remaining);
            tracing::debug!(
                signature,
                confirmations,
                status = ?status.as_ref().and_then(|s| s.confirmation_status.clone()),
                wait_ms = wait.as_millis() as u64,
                "Waiting for finality"
            );

            match cancel.as_mut() {
                Some(rx) => {
                    tokio::select! {
                        _ = sleep(wait) => {}
                        _ = rx.recv() => {
                            tracing::info!(signature, polls, "Confirmation wait cancelled");
                            metrics::record_confirmation("cancelled", polls);
                            return Err(ClientError::Cancelled);
                        }
                    }
                }
                None => sleep(wait).await,
            }

            if started.elapsed() >= self.deadline {
                tracing::warn!(signature, polls, deadline_ms = self.deadline.as_millis() as u64, "Transaction not finalized before deadline");
                metrics::record_confirmation("timed_out", polls);
                return Ok(ConfirmationOutcome::TimedOut { polls });
            }
        }
    }
}

/// One status query. Returns the entry for `signature`, `None` when the node
/// does not know it yet.
async fn poll_status<T: RpcTransport>(rpc: &RpcClient<T>, signature: &str) -> ClientResult<Option<SignatureStatus>> {
    let response: SignatureStatusesResponse = rpc
        .call(
            "getSignatureStatuses",
            vec![json!([signature]), json!({ "searchTransactionHistory": true })],
        )
        .await
        .map_err(|e| match e {
            ClientError::Rpc { code, message } => {
                ClientError::SignatureStatusInvalid(format!("{}, {}", code, message))
            }
            ClientError::Transport(cause) => ClientError::SignatureStatusInvalid(cause),
            other => other,
        })?;

    if let Some(failed) = response.value.iter().flatten().find(|s| s.err.is_some()) {
        let err = failed.err.as_ref().map(|e| e.to_string()).unwrap_or_default();
        tracing::warn!(signature, slot = failed.slot, err = %err, "Transaction failed on-chain");
        return Err(ClientError::SignatureStatusError(err));
    }

    Ok(response.value.into_iter().next().flatten())
}
