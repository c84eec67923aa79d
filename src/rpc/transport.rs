//! HTTP exchange underneath the JSON-RPC driver.
//!
//! # Responsibilities
//! - Execute one request (URL, method, headers, body) and return the raw body
//! - Enforce a per-request timeout
//!
//! # Design Decisions
//! - Non-2xx statuses still return the body; JSON-RPC errors travel inside it
//! - No retries at this layer

use std::future::Future;
use std::time::Duration;

use thiserror::Error;
use tokio::time::timeout;

use crate::error::ClientError;

/// One HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Failure to complete an HTTP exchange.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("http exchange failed: {0}")]
    Http(String),
}

impl From<TransportError> for ClientError {
    fn from(e: TransportError) -> Self {
        ClientError::Transport(e.to_string())
    }
}

/// Executes raw HTTP exchanges for the JSON-RPC driver.
pub trait RpcTransport: Send + Sync {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<String, TransportError>> + Send;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    timeout_duration: Duration,
}

impl HttpTransport {
    pub fn new(timeout_duration: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout_duration,
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl RpcTransport for HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<String, TransportError> {
        let HttpRequest { url, method, headers, body } = request;
        let method = reqwest::Method::from_bytes(method.as_bytes())
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        let mut builder = self.client.request(method, url.as_str());
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let exchange = async move {
            let response = builder.body(body).send().await?;
            let status = response.status();
            let text = response.text().await?;
            if !status.is_success() {
                tracing::debug!(status = %status, url = %url, "Non-success HTTP status from RPC endpoint");
            }
            Ok::<_, reqwest::Error>(text)
        };

        match timeout(self.timeout_duration, exchange).await {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(TransportError::Http(e.to_string())),
            Err(_) => Err(TransportError::Timeout(self.timeout_duration)),
        }
    }
}
