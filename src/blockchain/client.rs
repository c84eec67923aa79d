//! Chain client facade.
//!
//! # Responsibilities
//! - Bind one RPC endpoint and the configured defaults
//! - Expose each transaction-lifecycle use case as a method
//! - Chain airdrop and settlement polling for callers that want both
//!
//! Every method is an independent operation; the client holds no mutable
//! state and can be shared across tasks.

use std::time::Duration;

use crate::blockchain::confirmation::{ConfirmationOutcome, ConfirmationPoller};
use crate::blockchain::types::{Blockhash, PublicKey, Transaction};
use crate::blockchain::{airdrop, balance, blockhash, memo, submit};
use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::lifecycle::Shutdown;
use crate::observability::metrics;
use crate::rpc::{HttpTransport, RpcClient, RpcTransport};

/// Transaction-lifecycle operations against one node.
#[derive(Clone)]
pub struct ChainClient<T = HttpTransport> {
    rpc: RpcClient<T>,
    config: ClientConfig,
    poller: ConfirmationPoller,
}

impl ChainClient<HttpTransport> {
    /// Create a client over HTTP using `config.rpc`.
    pub fn from_config(config: ClientConfig) -> Self {
        let transport = HttpTransport::new(Duration::from_secs(config.rpc.request_timeout_secs));
        Self::with_transport(config, transport)
    }
}

impl<T: RpcTransport> ChainClient<T> {
    /// Create a client over an arbitrary transport. Applies
    /// `observability.metrics_enabled`, which is process-wide.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        metrics::set_enabled(config.observability.metrics_enabled);
        let rpc = RpcClient::new(config.rpc.endpoint.clone(), transport);
        let poller = ConfirmationPoller::new(&config.confirmation);
        tracing::debug!(endpoint = %config.rpc.endpoint, "Chain client initialized");
        Self { rpc, config, poller }
    }

    /// Cancel confirmation waits when `shutdown` triggers.
    pub fn with_cancellation(mut self, shutdown: &Shutdown) -> Self {
        self.poller = self.poller.with_cancellation(shutdown);
        self
    }

    pub fn rpc(&self) -> &RpcClient<T> {
        &self.rpc
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Balance of `address` in lamports.
    pub async fn get_balance(&self, address: &PublicKey) -> ClientResult<u64> {
        balance::get_balance(&self.rpc, address).await
    }

    /// Latest blockhash at the configured commitment.
    pub async fn get_latest_blockhash(&self) -> ClientResult<Blockhash> {
        blockhash::get_latest_blockhash(&self.rpc, &self.config.rpc.commitment).await
    }

    /// Latest blockhash at an explicit commitment.
    pub async fn get_latest_blockhash_with(&self, commitment: &str) -> ClientResult<Blockhash> {
        blockhash::get_latest_blockhash(&self.rpc, commitment).await
    }

    /// Request an airdrop; returns the funding signature without waiting.
    pub async fn request_airdrop(&self, address: &PublicKey, lamports: u64) -> ClientResult<String> {
        airdrop::request_airdrop(&self.rpc, address, lamports).await
    }

    /// Wait for `signature` to be finalized.
    pub async fn confirm_transaction(&self, signature: &str) -> ClientResult<ConfirmationOutcome> {
        self.poller.wait_for_finality(&self.rpc, signature).await
    }

    /// Request an airdrop and wait for its settlement.
    pub async fn request_airdrop_and_confirm(
        &self,
        address: &PublicKey,
        lamports: u64,
    ) -> ClientResult<(String, ConfirmationOutcome)> {
        let signature = self.request_airdrop(address, lamports).await?;
        let outcome = self.confirm_transaction(&signature).await?;
        Ok((signature, outcome))
    }

    /// Unsigned memo transaction for `signer`.
    pub async fn build_memo_transaction(&self, signer: PublicKey, memo: &str) -> ClientResult<Transaction> {
        memo::build_memo_transaction(&self.rpc, signer, memo, &self.config.rpc.commitment).await
    }

    /// Submit signed transactions; see [`submit::send_transactions`].
    pub async fn send_transactions(&self, transactions: &[Vec<u8>]) -> ClientResult<Vec<String>> {
        submit::send_transactions(&self.rpc, transactions).await
    }
}

impl<T> std::fmt::Debug for ChainClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("endpoint", &self.config.rpc.endpoint)
            .field("commitment", &self.config.rpc.commitment)
            .field("deadline_ms", &self.config.confirmation.deadline_ms)
            .finish()
    }
}
