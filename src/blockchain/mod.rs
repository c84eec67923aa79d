//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! caller
//!     → client.rs (ChainClient facade, configured defaults)
//!     → balance.rs / blockhash.rs / airdrop.rs / memo.rs / submit.rs
//!       (one RPC call each; memo fetches a blockhash)
//!     → confirmation.rs (repeated status polls until finality)
//!     → rpc::RpcClient
//! ```
//!
//! # Constraints
//! - No key management and no signing: transactions leave here unsigned and
//!   come back signed from an external wallet
//! - Success is never reported before finality; waits always end

pub mod airdrop;
pub mod balance;
pub mod blockhash;
pub mod client;
pub mod confirmation;
pub mod memo;
pub mod submit;
pub mod types;

pub use client::ChainClient;
pub use confirmation::{ConfirmationOutcome, ConfirmationPoller};
pub use types::{
    AccountMeta, Blockhash, ConfirmationStatus, Instruction, Message, PublicKey, SignatureStatus,
    Transaction,
};
