//! Airdrop requests (devnet/testnet faucets).

use serde_json::json;

use crate::blockchain::types::PublicKey;
use crate::error::{ClientError, ClientResult};
use crate::rpc::{RpcClient, RpcTransport};

/// Ask the node to credit `lamports` to `address`. Returns the base58
/// signature of the funding transaction; settlement is not awaited here.
pub async fn request_airdrop<T: RpcTransport>(
    rpc: &RpcClient<T>,
    address: &PublicKey,
    lamports: u64,
) -> ClientResult<String> {
    if lamports == 0 {
        return Err(ClientError::AirdropFailed {
            code: 0,
            message: "lamport amount must be positive".to_string(),
        });
    }

    let signature: Option<String> = rpc
        .call("requestAirdrop", vec![json!(address.to_base58()), json!(lamports)])
        .await
        .map_err(|e| match e {
            ClientError::Rpc { code, message } => ClientError::AirdropFailed { code, message },
            other => other,
        })?;

    let signature = signature
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ClientError::AirdropFailed {
            code: 0,
            message: "Unknown Error".to_string(),
        })?;

    tracing::info!(pubkey = %address, lamports, signature = %signature, "requestAirdrop submitted");
    Ok(signature)
}
