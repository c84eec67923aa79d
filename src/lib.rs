//! Client-side Solana wallet core: JSON-RPC driver, transaction lifecycle
//! use cases, settlement polling and wallet session persistence.

pub mod blockchain;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod observability;
pub mod resilience;
pub mod rpc;
pub mod session;

pub use blockchain::{ChainClient, ConfirmationOutcome, ConfirmationPoller, PublicKey};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use lifecycle::Shutdown;
pub use rpc::{HttpTransport, RpcClient, RpcTransport};
pub use session::{SessionStore, WalletConnection};
