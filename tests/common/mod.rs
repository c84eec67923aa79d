//! Shared utilities for integration testing: a programmable JSON-RPC node.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use solana_wallet_rpc::ClientConfig;

/// Requests received by a mock node, in arrival order.
#[derive(Clone, Default)]
pub struct Recorded(Arc<Mutex<Vec<Value>>>);

impl Recorded {
    pub fn requests(&self) -> Vec<Value> {
        self.0.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn methods(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| r["method"].as_str().unwrap_or_default().to_string())
            .collect()
    }
}

/// Successful envelope echoing the request id.
pub fn result(request: &Value, result: Value) -> (u16, Value) {
    (200, json!({"jsonrpc": "2.0", "result": result, "id": request["id"]}))
}

/// Error envelope echoing the request id.
#[allow(dead_code)]
pub fn error(request: &Value, code: i64, message: &str) -> (u16, Value) {
    (
        200,
        json!({"jsonrpc": "2.0", "error": {"code": code, "message": message}, "id": request["id"]}),
    )
}

/// Start a mock node whose responses come from `f(request, call_index)`.
pub async fn start_programmable_node<F>(f: F) -> (SocketAddr, Recorded)
where
    F: Fn(&Value, usize) -> (u16, Value) + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);
    let recorded = Recorded::default();
    let calls = Arc::new(AtomicUsize::new(0));

    let rec = recorded.clone();
    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let f = f.clone();
                    let rec = rec.clone();
                    let calls = calls.clone();
                    tokio::spawn(async move {
                        let _ = serve(socket, move |request| {
                            rec.0.lock().unwrap().push(request.clone());
                            f(&request, calls.fetch_add(1, Ordering::SeqCst))
                        })
                        .await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, recorded)
}

/// Client configuration pointing at `addr`, with fast confirmation timing.
#[allow(dead_code)]
pub fn config_for(addr: SocketAddr) -> ClientConfig {
    let mut config = ClientConfig::default();
    config.rpc.endpoint = format!("http://{}", addr);
    config.rpc.request_timeout_secs = 5;
    config.confirmation.slot_interval_ms = 1;
    config
}

async fn serve<H>(mut socket: TcpStream, handler: H) -> std::io::Result<()>
where
    H: FnOnce(Value) -> (u16, Value),
{
    let body = read_body(&mut socket).await?;
    let request: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let (status, response) = handler(request);

    let status_text = match status {
        200 => "200 OK",
        429 => "429 Too Many Requests",
        500 => "500 Internal Server Error",
        503 => "503 Service Unavailable",
        _ => "200 OK",
    };
    let body = response.to_string();
    let response_str = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status_text,
        body.len(),
        body
    );
    socket.write_all(response_str.as_bytes()).await?;
    socket.shutdown().await
}

async fn read_body(socket: &mut TcpStream) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    let header_end = loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(Vec::new());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while buf.len() < header_end + content_length {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    let end = buf.len().min(header_end + content_length);
    Ok(buf[header_end..end].to_vec())
}
