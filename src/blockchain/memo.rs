//! Unsigned memo transaction construction.

use crate::blockchain::blockhash::get_latest_blockhash;
use crate::blockchain::types::{AccountMeta, Instruction, Message, PublicKey, Transaction, MEMO_PROGRAM_ID};
use crate::error::ClientResult;
use crate::rpc::{RpcClient, RpcTransport};

/// Id of the memo program as a key.
pub fn memo_program_id() -> ClientResult<PublicKey> {
    MEMO_PROGRAM_ID.parse()
}

/// Memo instruction: `signer` signs and is writable, `memo` is the data.
pub fn memo_instruction(signer: PublicKey, memo: &str) -> ClientResult<Instruction> {
    Ok(Instruction {
        program_id: memo_program_id()?,
        accounts: vec![AccountMeta::signer_writable(signer)],
        data: memo.as_bytes().to_vec(),
    })
}

/// Build an unsigned transaction carrying `memo`, bound to a fresh blockhash.
///
/// The only network call is the blockhash fetch; its failure propagates as is.
pub async fn build_memo_transaction<T: RpcTransport>(
    rpc: &RpcClient<T>,
    signer: PublicKey,
    memo: &str,
    commitment: &str,
) -> ClientResult<Transaction> {
    let instruction = memo_instruction(signer, memo)?;
    let recent_blockhash = get_latest_blockhash(rpc, commitment).await?;

    tracing::debug!(
        signer = %signer,
        memo_len = memo.len(),
        blockhash = %recent_blockhash.value,
        "Built memo transaction"
    );

    Ok(Transaction::unsigned(Message {
        instructions: vec![instruction],
        recent_blockhash,
    }))
}
