//! Account balance lookup.

use serde::Deserialize;
use serde_json::json;

use crate::blockchain::types::PublicKey;
use crate::error::{ClientError, ClientResult};
use crate::rpc::{RpcClient, RpcTransport};

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    value: u64,
}

/// Fetch the balance of `address` in lamports.
pub async fn get_balance<T: RpcTransport>(rpc: &RpcClient<T>, address: &PublicKey) -> ClientResult<u64> {
    let response: BalanceResponse = rpc
        .call("getBalance", vec![json!(address.to_base58())])
        .await
        .map_err(|e| match e {
            ClientError::Rpc { code, message } => ClientError::InvalidAccount { code, message },
            other => other,
        })?;

    tracing::debug!(pubkey = %address, balance = response.value, "getBalance");
    Ok(response.value)
}
