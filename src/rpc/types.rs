//! JSON-RPC 2.0 envelope types.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

/// Outgoing request envelope.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub method: String,
    pub params: Vec<Value>,
    pub id: String,
}

impl JsonRpcRequest {
    pub fn new(method: impl Into<String>, params: Vec<Value>, id: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method: method.into(),
            params,
            id: id.into(),
        }
    }
}

/// Error object carried by a failed response.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// Incoming response envelope.
///
/// `result` is `Some` whenever the key is present, including an explicit
/// `null`, so callers can tell "no result" from "null result".
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct JsonRpcResponse<T = Value> {
    #[serde(default, deserialize_with = "present")]
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
    #[serde(default)]
    pub id: Option<Value>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_shape() {
        let req = JsonRpcRequest::new("getBalance", vec![json!("abc")], "42");
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({"jsonrpc": "2.0", "method": "getBalance", "params": ["abc"], "id": "42"})
        );
    }

    #[test]
    fn test_null_result_is_present() {
        let resp: JsonRpcResponse = serde_json::from_str(r#"{"jsonrpc":"2.0","result":null,"id":"1"}"#).unwrap();
        assert_eq!(resp.result, Some(Value::Null));

        let resp: JsonRpcResponse = serde_json::from_str(r#"{"jsonrpc":"2.0","id":"1"}"#).unwrap();
        assert!(resp.result.is_none());
        assert!(resp.error.is_none());
    }

    #[test]
    fn test_error_object() {
        let resp: JsonRpcResponse = serde_json::from_str(
            r#"{"jsonrpc":"2.0","error":{"code":-32602,"message":"Invalid param"},"id":"1"}"#,
        )
        .unwrap();
        assert_eq!(
            resp.error,
            Some(RpcErrorObject { code: -32602, message: "Invalid param".to_string() })
        );
    }
}
