//! Wallet session persistence.
//!
//! # Data Flow
//! ```text
//! external wallet authorizes
//!     → connection.rs (SessionStore::persist_connection)
//!     → store.rs (durable fields first)
//!     → in-memory cache
//!
//! process restart
//!     → SessionStore::get_connection reads durable fields
//! ```

pub mod connection;
pub mod store;

pub use connection::{SessionStore, WalletConnection};
pub use store::{FileStore, KeyValueStore, MemoryStore};
