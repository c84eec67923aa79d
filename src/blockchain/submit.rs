//! Batch submission of signed transactions.

use serde_json::json;

use crate::error::{ClientError, ClientResult};
use crate::rpc::{RpcClient, RpcTransport};

/// Send each already-signed transaction, in order, one `sendTransaction` call
/// per item.
///
/// Per-item failures are logged and recorded; the batch always runs to the
/// end. Returns the signatures when every item was accepted, otherwise
/// `PartialSendFailure` with one mask entry per input index.
pub async fn send_transactions<T: RpcTransport>(
    rpc: &RpcClient<T>,
    transactions: &[Vec<u8>],
) -> ClientResult<Vec<String>> {
    let mut signatures: Vec<Option<String>> = Vec::with_capacity(transactions.len());

    for (index, transaction) in transactions.iter().enumerate() {
        let encoded = bs58::encode(transaction).into_string();
        let result: ClientResult<String> = rpc.call("sendTransaction", vec![json!(encoded)]).await;

        let signature = match result {
            Ok(signature) if !signature.is_empty() => {
                tracing::debug!(index, signature = %signature, "Transaction sent");
                Some(signature)
            }
            Ok(_) => {
                tracing::error!(index, "Failed sending transaction: empty signature");
                None
            }
            Err(ClientError::Rpc { code, message }) => {
                tracing::error!(index, code, message = %message, "Failed sending transaction");
                None
            }
            Err(e) => {
                tracing::error!(index, error = %e, "Failed sending transaction");
                None
            }
        };
        signatures.push(signature);
    }

    if signatures.iter().any(Option::is_none) {
        let success_mask: Vec<bool> = signatures.iter().map(Option::is_some).collect();
        tracing::warn!(
            failed = success_mask.iter().filter(|ok| !**ok).count(),
            total = success_mask.len(),
            "Batch submission incomplete"
        );
        return Err(ClientError::PartialSendFailure { success_mask });
    }

    Ok(signatures.into_iter().flatten().collect())
}
