//! JSON-RPC subsystem.
//!
//! # Data Flow
//! ```text
//! use case (blockchain/*)
//!     → client.rs (envelope, request id, typed decode)
//!     → transport.rs (one HTTP POST, timeout)
//!     → node
//! ```

pub mod client;
pub mod transport;
pub mod types;

pub use client::RpcClient;
pub use transport::{HttpRequest, HttpTransport, RpcTransport, TransportError};
pub use types::{JsonRpcRequest, JsonRpcResponse, RpcErrorObject};

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory transport that replays scripted response bodies.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use serde_json::{json, Value};

    use super::transport::{HttpRequest, RpcTransport, TransportError};

    /// Successful response envelope.
    pub fn ok(result: Value) -> Value {
        json!({"jsonrpc": "2.0", "result": result, "id": "1"})
    }

    /// Error response envelope.
    pub fn rpc_error(code: i64, message: &str) -> Value {
        json!({"jsonrpc": "2.0", "error": {"code": code, "message": message}, "id": "1"})
    }

    #[derive(Default)]
    pub struct ScriptedTransport {
        responses: Mutex<VecDeque<Result<String, String>>>,
        sent: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        pub fn with(responses: Vec<Value>) -> Self {
            let transport = Self::default();
            for response in responses {
                transport.push_json(response);
            }
            transport
        }

        pub fn push_json(&self, response: Value) {
            self.push_raw(&response.to_string());
        }

        pub fn push_raw(&self, body: &str) {
            self.responses.lock().unwrap().push_back(Ok(body.to_string()));
        }

        pub fn push_transport_error(&self, reason: &str) {
            self.responses.lock().unwrap().push_back(Err(reason.to_string()));
        }

        pub fn sent(&self) -> Vec<HttpRequest> {
            self.sent.lock().unwrap().clone()
        }

        pub fn sent_bodies(&self) -> Vec<Value> {
            self.sent()
                .iter()
                .map(|r| serde_json::from_str(&r.body).unwrap())
                .collect()
        }

        pub fn sent_ids(&self) -> Vec<String> {
            self.sent_bodies()
                .iter()
                .map(|b| b["id"].as_str().unwrap().to_string())
                .collect()
        }
    }

    impl RpcTransport for ScriptedTransport {
        async fn send(&self, request: HttpRequest) -> Result<String, TransportError> {
            self.sent.lock().unwrap().push(request);
            match self.responses.lock().unwrap().pop_front() {
                Some(Ok(body)) => Ok(body),
                Some(Err(reason)) => Err(TransportError::Http(reason)),
                None => Err(TransportError::Http("script exhausted".to_string())),
            }
        }
    }
}
