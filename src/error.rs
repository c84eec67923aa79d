//! Error kinds shared by every use case in the crate.

use thiserror::Error;

/// Errors that can occur while talking to the node or managing the session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Network or IO failure below the JSON-RPC layer. Never retried here.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The response body did not match the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A key string was not valid base58 or did not decode to 32 bytes.
    #[error("Invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    /// Balance lookup rejected by the node.
    #[error("Could not fetch balance for account: {code}, {message}")]
    InvalidAccount { code: i64, message: String },

    /// Latest blockhash could not be obtained.
    #[error("Could not fetch latest blockhash: {0}")]
    BlockhashUnavailable(String),

    /// Airdrop request rejected or returned no signature.
    #[error("Airdrop failed: {code}, {message}")]
    AirdropFailed { code: i64, message: String },

    /// The node rejected a signature status query, or the query could not be sent.
    #[error("Signature status invalid: {0}")]
    SignatureStatusInvalid(String),

    /// The transaction failed on-chain. Terminal.
    #[error("Signature status error: {0}")]
    SignatureStatusError(String),

    /// At least one transaction of a batch was not accepted.
    #[error("{} of {} transactions failed to send", .success_mask.iter().filter(|ok| !**ok).count(), .success_mask.len())]
    PartialSendFailure { success_mask: Vec<bool> },

    /// A wallet connection was built from incomplete credentials.
    #[error("Invalid session: {0}")]
    InvalidSession(String),

    /// Durable session storage failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A wait was abandoned through the cancellation signal.
    #[error("Operation cancelled")]
    Cancelled,
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Indices of the transactions that need resubmission, for a
    /// `PartialSendFailure`. Empty for every other kind.
    pub fn failed_indices(&self) -> Vec<usize> {
        match self {
            ClientError::PartialSendFailure { success_mask } => success_mask
                .iter()
                .enumerate()
                .filter(|(_, ok)| !**ok)
                .map(|(i, _)| i)
                .collect(),
            _ => Vec::new(),
        }
    }
}
