//! JSON-RPC 2.0 request/response driver.
//!
//! # Responsibilities
//! - Assign a unique request id (UUID v4) per call
//! - Serialize the envelope and POST it through the transport
//! - Decode a typed result or surface the server's error object
//!
//! # Design Decisions
//! - Every call is attempted exactly once; retry policy belongs to callers
//! - An `error` object wins; `result` is not decoded in that case

use std::time::Instant;

use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{ClientError, ClientResult};
use crate::observability::metrics;
use crate::rpc::transport::{HttpRequest, HttpTransport, RpcTransport};
use crate::rpc::types::{JsonRpcRequest, JsonRpcResponse};

/// JSON-RPC client bound to one endpoint.
#[derive(Debug, Clone)]
pub struct RpcClient<T = HttpTransport> {
    endpoint: String,
    transport: T,
}

impl<T: RpcTransport> RpcClient<T> {
    pub fn new(endpoint: impl Into<String>, transport: T) -> Self {
        Self {
            endpoint: endpoint.into(),
            transport,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Call `method` with positional `params` and decode the result as `R`.
    pub async fn call<R: DeserializeOwned>(&self, method: &str, params: Vec<Value>) -> ClientResult<R> {
        let id = Uuid::new_v4().to_string();
        let request = JsonRpcRequest::new(method, params, id.clone());
        let body = serde_json::to_string(&request)
            .map_err(|e| ClientError::Transport(format!("could not encode request: {}", e)))?;

        let started = Instant::now();
        let raw = match self
            .transport
            .send(HttpRequest {
                url: self.endpoint.clone(),
                method: "POST".to_string(),
                headers: vec![("Content-Type".to_string(), "application/json".to_string())],
                body,
            })
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(method, request_id = %id, error = %e, "RPC transport failure");
                metrics::record_rpc_request(method, "transport_error", started.elapsed());
                return Err(e.into());
            }
        };

        let result = decode_response(&raw);
        let outcome = match &result {
            Ok(_) => "ok",
            Err(ClientError::Rpc { .. }) => "rpc_error",
            Err(_) => "malformed",
        };
        metrics::record_rpc_request(method, outcome, started.elapsed());
        tracing::debug!(method, request_id = %id, outcome, "RPC call completed");

        result
    }
}

fn decode_response<R: DeserializeOwned>(raw: &str) -> ClientResult<R> {
    let envelope: JsonRpcResponse = serde_json::from_str(raw)
        .map_err(|e| ClientError::MalformedResponse(format!("invalid JSON-RPC envelope: {}", e)))?;

    if let Some(error) = envelope.error {
        return Err(ClientError::Rpc {
            code: error.code,
            message: error.message,
        });
    }

    match envelope.result {
        Some(value) => serde_json::from_value(value)
            .map_err(|e| ClientError::MalformedResponse(format!("unexpected result shape: {}", e))),
        None => Err(ClientError::MalformedResponse(
            "response carries neither result nor error".to_string(),
        )),
    }
}
