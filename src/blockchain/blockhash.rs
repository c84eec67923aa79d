//! Latest blockhash query.

use serde::Deserialize;
use serde_json::json;

use crate::blockchain::types::Blockhash;
use crate::error::{ClientError, ClientResult};
use crate::rpc::{RpcClient, RpcTransport};

/// Commitment used when the caller does not pick one.
pub const DEFAULT_COMMITMENT: &str = "confirmed";

#[derive(Debug, Deserialize)]
struct BlockhashResponse {
    #[serde(default)]
    value: Option<BlockhashInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BlockhashInfo {
    #[serde(default)]
    blockhash: Option<String>,
    #[serde(default)]
    last_valid_block_height: u64,
}

/// Fetch the latest blockhash at `commitment`.
pub async fn get_latest_blockhash<T: RpcTransport>(
    rpc: &RpcClient<T>,
    commitment: &str,
) -> ClientResult<Blockhash> {
    let response: BlockhashResponse = rpc
        .call("getLatestBlockhash", vec![json!({ "commitment": commitment })])
        .await
        .map_err(|e| match e {
            ClientError::Rpc { code, message } => {
                ClientError::BlockhashUnavailable(format!("{}, {}", code, message))
            }
            other => other,
        })?;

    let info = response
        .value
        .ok_or_else(|| ClientError::BlockhashUnavailable("UnknownError".to_string()))?;
    let value = info
        .blockhash
        .filter(|b| !b.is_empty())
        .ok_or_else(|| ClientError::BlockhashUnavailable("UnknownError".to_string()))?;

    tracing::debug!(blockhash = %value, last_valid_block_height = info.last_valid_block_height, "getLatestBlockhash");

    Ok(Blockhash {
        value,
        last_valid_block_height: info.last_valid_block_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::testing::{ok, rpc_error, ScriptedTransport};

    #[tokio::test]
    async fn test_latest_blockhash() {
        let rpc = RpcClient::new(
            "http://node.test",
            ScriptedTransport::with(vec![ok(json!({
                "context": {"slot": 2792},
                "value": {
                    "blockhash": "EkSnNWid2cvwEVnVx9aBqawnmiCNiDgp3gUdkDPTKN1N",
                    "lastValidBlockHeight": 3090
                }
            }))]),
        );

        let blockhash = get_latest_blockhash(&rpc, DEFAULT_COMMITMENT).await.unwrap();
        assert_eq!(blockhash.value, "EkSnNWid2cvwEVnVx9aBqawnmiCNiDgp3gUdkDPTKN1N");
        assert_eq!(blockhash.last_valid_block_height, 3090);

        let body = &rpc.transport().sent_bodies()[0];
        assert_eq!(body["method"], "getLatestBlockhash");
        assert_eq!(body["params"], json!([{"commitment": "confirmed"}]));
    }

    #[tokio::test]
    async fn test_commitment_is_passed_through() {
        let rpc = RpcClient::new(
            "http://node.test",
            ScriptedTransport::with(vec![ok(json!({"value": {"blockhash": "abc", "lastValidBlockHeight": 1}}))]),
        );
        get_latest_blockhash(&rpc, "finalized").await.unwrap();
        assert_eq!(rpc.transport().sent_bodies()[0]["params"], json!([{"commitment": "finalized"}]));
    }

    #[tokio::test]
    async fn test_missing_blockhash_field() {
        let rpc = RpcClient::new(
            "http://node.test",
            ScriptedTransport::with(vec![
                ok(json!({"value": {"lastValidBlockHeight": 3090}})),
                ok(json!({"context": {"slot": 1}})),
            ]),
        );
        let err = get_latest_blockhash(&rpc, DEFAULT_COMMITMENT).await.unwrap_err();
        assert!(matches!(err, ClientError::BlockhashUnavailable(_)));
        let err = get_latest_blockhash(&rpc, DEFAULT_COMMITMENT).await.unwrap_err();
        assert!(matches!(err, ClientError::BlockhashUnavailable(_)));
    }

    #[tokio::test]
    async fn test_rpc_error() {
        let rpc = RpcClient::new(
            "http://node.test",
            ScriptedTransport::with(vec![rpc_error(-32005, "Node is behind")]),
        );
        let err = get_latest_blockhash(&rpc, DEFAULT_COMMITMENT).await.unwrap_err();
        assert_eq!(err, ClientError::BlockhashUnavailable("-32005, Node is behind".to_string()));
    }
}
