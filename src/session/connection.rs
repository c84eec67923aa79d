//! Active wallet session: in-memory cache over durable fields.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::blockchain::types::PublicKey;
use crate::error::{ClientError, ClientResult};
use crate::observability::metrics;
use crate::session::store::KeyValueStore;

const PUBKEY_KEY: &str = "stored_pubkey";
const ACCOUNT_LABEL_KEY: &str = "stored_account_label";
const AUTH_TOKEN_KEY: &str = "stored_auth_token";

/// Wallet connection state.
///
/// Build `Connected` through [`WalletConnection::connected`], which rejects an
/// empty auth token. The variant stays public for pattern matching;
/// constructing it directly skips that check.
#[derive(Clone, PartialEq, Eq, Default)]
pub enum WalletConnection {
    #[default]
    NotConnected,
    /// Active session. `auth_token` is never empty when built by `connected`.
    Connected {
        public_key: PublicKey,
        account_label: String,
        auth_token: String,
    },
}

impl WalletConnection {
    /// Build a `Connected` value. The auth token must be non-empty; the label
    /// may be empty when the wallet supplies none.
    pub fn connected(
        public_key: PublicKey,
        account_label: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> ClientResult<Self> {
        let auth_token = auth_token.into();
        if auth_token.is_empty() {
            return Err(ClientError::InvalidSession("auth token is empty".to_string()));
        }
        Ok(Self::Connected {
            public_key,
            account_label: account_label.into(),
            auth_token,
        })
    }

    pub fn is_connected(&self) -> bool {
        matches!(self, Self::Connected { .. })
    }

    pub fn public_key(&self) -> Option<&PublicKey> {
        match self {
            Self::Connected { public_key, .. } => Some(public_key),
            Self::NotConnected => None,
        }
    }
}

// Auth tokens stay out of logs.
impl fmt::Debug for WalletConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConnected => f.write_str("NotConnected"),
            Self::Connected {
                public_key,
                account_label,
                ..
            } => f
                .debug_struct("Connected")
                .field("public_key", public_key)
                .field("account_label", account_label)
                .field("auth_token", &"<redacted>")
                .finish(),
        }
    }
}

/// Durable field names under a namespace.
#[derive(Debug, Clone)]
struct SessionKeys {
    pubkey: String,
    account_label: String,
    auth_token: String,
}

impl SessionKeys {
    fn new(namespace: &str) -> Self {
        Self {
            pubkey: format!("{}.{}", namespace, PUBKEY_KEY),
            account_label: format!("{}.{}", namespace, ACCOUNT_LABEL_KEY),
            auth_token: format!("{}.{}", namespace, AUTH_TOKEN_KEY),
        }
    }
}

/// Remembers which wallet session is active.
///
/// The in-memory value is authoritative once `Connected`; otherwise the
/// durable fields decide. Writes hit durable storage before the cache.
pub struct SessionStore<S> {
    store: S,
    keys: SessionKeys,
    cache: Mutex<WalletConnection>,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S, namespace: &str) -> Self {
        Self {
            store,
            keys: SessionKeys::new(namespace),
            cache: Mutex::new(WalletConnection::NotConnected),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn cache(&self) -> MutexGuard<'_, WalletConnection> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current connection, reading durable fields when the cache is empty.
    pub fn get_connection(&self) -> ClientResult<WalletConnection> {
        let cache = self.cache();
        if cache.is_connected() {
            return Ok(cache.clone());
        }

        let key = self.store.get(&self.keys.pubkey)?.unwrap_or_default();
        let label = self.store.get(&self.keys.account_label)?.unwrap_or_default();
        let token = self.store.get(&self.keys.auth_token)?.unwrap_or_default();

        if key.is_empty() || token.is_empty() {
            return Ok(WalletConnection::NotConnected);
        }

        let public_key: PublicKey = key.parse()?;
        WalletConnection::connected(public_key, label, token)
    }

    /// Persist a new active connection, then cache it.
    pub fn persist_connection(
        &self,
        public_key: PublicKey,
        account_label: &str,
        auth_token: &str,
    ) -> ClientResult<WalletConnection> {
        let connection = WalletConnection::connected(public_key, account_label, auth_token)?;

        // The token is the commit marker: blank it first, write it last, so a
        // failed write never pairs the new key with a previous token.
        let mut cache = self.cache();
        self.store.put(&self.keys.auth_token, "")?;
        self.store.put(&self.keys.pubkey, &public_key.to_base58())?;
        self.store.put(&self.keys.account_label, account_label)?;
        self.store.put(&self.keys.auth_token, auth_token)?;
        *cache = connection.clone();

        tracing::info!(pubkey = %public_key, label = %account_label, "Wallet session persisted");
        metrics::record_session_connected(true);
        Ok(connection)
    }

    /// Forget the active connection, durably and in memory.
    pub fn clear_connection(&self) -> ClientResult<()> {
        let mut cache = self.cache();
        self.store.put(&self.keys.auth_token, "")?;
        self.store.put(&self.keys.pubkey, "")?;
        self.store.put(&self.keys.account_label, "")?;
        *cache = WalletConnection::NotConnected;

        tracing::info!("Wallet session cleared");
        metrics::record_session_connected(false);
        Ok(())
    }
}
