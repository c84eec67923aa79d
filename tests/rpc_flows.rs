//! End-to-end flows over the HTTP transport against a mock node.

use serde_json::json;

use solana_wallet_rpc::blockchain::types::MEMO_PROGRAM_ID;
use solana_wallet_rpc::{ChainClient, ClientError, ConfirmationOutcome, PublicKey};

mod common;

fn account() -> PublicKey {
    PublicKey::new([42u8; 32])
}

#[tokio::test]
async fn test_balance_over_http() {
    let (addr, recorded) = common::start_programmable_node(|req, _| {
        common::result(req, json!({"context": {"slot": 1}, "value": 1_500_000_000u64}))
    })
    .await;
    let chain = ChainClient::from_config(common::config_for(addr));

    let lamports = chain.get_balance(&account()).await.unwrap();
    assert_eq!(lamports, 1_500_000_000);

    let requests = recorded.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["jsonrpc"], "2.0");
    assert_eq!(requests[0]["method"], "getBalance");
    assert_eq!(requests[0]["params"], json!([account().to_base58()]));
}

#[tokio::test]
async fn test_error_body_on_http_500() {
    let (addr, _) = common::start_programmable_node(|req, _| {
        let (_, body) = common::error(req, -32602, "Invalid param: could not find account");
        (500, body)
    })
    .await;
    let chain = ChainClient::from_config(common::config_for(addr));

    let err = chain.get_balance(&account()).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidAccount { code: -32602, .. }));
}

#[tokio::test]
async fn test_unreachable_node() {
    let mut config = solana_wallet_rpc::ClientConfig::default();
    config.rpc.endpoint = "http://127.0.0.1:1".to_string();
    config.rpc.request_timeout_secs = 2;
    let chain = ChainClient::from_config(config);

    let err = chain.get_balance(&account()).await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}

#[tokio::test]
async fn test_airdrop_then_finalized() {
    let (addr, recorded) = common::start_programmable_node(|req, call| match call {
        0 => common::result(req, json!("airdropSignature")),
        1 => common::result(req, json!({"value": [{"slot": 10, "confirmations": 5, "err": null, "confirmationStatus": "confirmed"}]})),
        2 => common::result(req, json!({"value": [{"slot": 10, "confirmations": 20, "err": null, "confirmationStatus": "confirmed"}]})),
        _ => common::result(req, json!({"value": [{"slot": 10, "confirmations": null, "err": null, "confirmationStatus": "finalized"}]})),
    })
    .await;
    let chain = ChainClient::from_config(common::config_for(addr));

    let (signature, outcome) = chain.request_airdrop_and_confirm(&account(), 10_000).await.unwrap();
    assert_eq!(signature, "airdropSignature");
    assert_eq!(outcome, ConfirmationOutcome::Finalized { polls: 3 });

    let requests = recorded.requests();
    assert_eq!(requests[0]["params"], json!([account().to_base58(), 10_000]));
    assert_eq!(
        requests[1]["params"],
        json!([["airdropSignature"], {"searchTransactionHistory": true}])
    );
    assert_eq!(
        recorded.methods(),
        vec!["requestAirdrop", "getSignatureStatuses", "getSignatureStatuses", "getSignatureStatuses"]
    );
}

#[tokio::test]
async fn test_confirmation_times_out() {
    let (addr, _) = common::start_programmable_node(|req, _| {
        common::result(req, json!({"value": [{"slot": 10, "confirmations": 0, "err": null, "confirmationStatus": null}]}))
    })
    .await;
    let mut config = common::config_for(addr);
    config.confirmation.deadline_ms = 100;
    let chain = ChainClient::from_config(config);

    let outcome = chain.confirm_transaction("pendingSignature").await.unwrap();
    assert!(matches!(outcome, ConfirmationOutcome::TimedOut { .. }));
}

#[tokio::test]
async fn test_on_chain_failure() {
    let (addr, recorded) = common::start_programmable_node(|req, _| {
        common::result(
            req,
            json!({"value": [{"slot": 10, "confirmations": 30, "err": {"InstructionError": [0, "InvalidAccountData"]}, "confirmationStatus": "confirmed"}]}),
        )
    })
    .await;
    let chain = ChainClient::from_config(common::config_for(addr));

    let err = chain.confirm_transaction("failedSignature").await.unwrap_err();
    assert!(matches!(err, ClientError::SignatureStatusError(_)));
    assert_eq!(recorded.requests().len(), 1);
}

#[tokio::test]
async fn test_memo_transaction_over_http() {
    let (addr, recorded) = common::start_programmable_node(|req, _| {
        common::result(
            req,
            json!({"context": {"slot": 1}, "value": {"blockhash": "EkSnNWid2cvwEVnVx9aBqawnmiCNiDgp3gUdkDPTKN1N", "lastValidBlockHeight": 3090}}),
        )
    })
    .await;
    let chain = ChainClient::from_config(common::config_for(addr));

    let tx = chain.build_memo_transaction(account(), "Hello Solana!").await.unwrap();
    assert!(tx.signatures.is_empty());
    assert_eq!(tx.message.instructions[0].program_id.to_string(), MEMO_PROGRAM_ID);
    assert_eq!(tx.message.recent_blockhash.last_valid_block_height, 3090);
    assert_eq!(recorded.requests()[0]["params"], json!([{"commitment": "confirmed"}]));
}

#[tokio::test]
async fn test_partial_batch_failure() {
    let (addr, recorded) = common::start_programmable_node(|req, call| {
        if call == 1 {
            common::error(req, -32002, "Transaction simulation failed: Blockhash not found")
        } else {
            common::result(req, json!(format!("sig{}", call)))
        }
    })
    .await;
    let chain = ChainClient::from_config(common::config_for(addr));

    let batch = vec![vec![1u8; 64], vec![2u8; 64], vec![3u8; 64]];
    let err = chain.send_transactions(&batch).await.unwrap_err();
    assert_eq!(
        err,
        ClientError::PartialSendFailure {
            success_mask: vec![true, false, true]
        }
    );
    assert_eq!(recorded.requests().len(), 3);
    assert_eq!(
        recorded.requests()[2]["params"],
        json!([bs58::encode(vec![3u8; 64]).into_string()])
    );
}

#[tokio::test]
async fn test_batch_all_accepted() {
    let (addr, _) = common::start_programmable_node(|req, call| common::result(req, json!(format!("sig{}", call)))).await;
    let chain = ChainClient::from_config(common::config_for(addr));

    let signatures = chain.send_transactions(&[vec![1u8; 8], vec![2u8; 8]]).await.unwrap();
    assert_eq!(signatures, vec!["sig0", "sig1"]);
}
