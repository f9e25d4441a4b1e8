//! Shared utilities for integration tests.
//!
//! A tiny JSON-RPC node over HTTP/1.1: one request per connection, answered
//! by a programmable handler, `Connection: close` after every response.

use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Calls seen by a mock node, as `(method, params)`.
pub type CallLog = Arc<Mutex<Vec<(String, Value)>>>;

/// Start a mock node. `handler` maps `(method, params)` to the JSON `result`.
pub async fn start_mock_node<F>(handler: F) -> (SocketAddr, CallLog)
where
    F: Fn(&str, &Value) -> Value + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);
    let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
    let log = calls.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let handler = handler.clone();
                    let log = log.clone();
                    tokio::spawn(async move {
                        let Some(body) = read_request_body(&mut socket).await else {
                            return;
                        };
                        let Ok(request) = serde_json::from_slice::<Value>(&body) else {
                            return;
                        };

                        let method = request["method"].as_str().unwrap_or_default().to_string();
                        let params = request["params"].clone();
                        let result = handler(&method, &params);
                        log.lock().unwrap().push((method, params));

                        let payload = json!({
                            "jsonrpc": "2.0",
                            "id": request["id"].clone(),
                            "result": result,
                        })
                        .to_string();
                        let response = format!(
                            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            payload.len(),
                            payload
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, calls)
}

/// Start a node that accepts connections and never answers.
#[allow(dead_code)]
pub async fn start_silent_node() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// Methods called so far, in order.
#[allow(dead_code)]
pub fn methods(calls: &CallLog) -> Vec<String> {
    calls.lock().unwrap().iter().map(|(m, _)| m.clone()).collect()
}

async fn read_request_body(socket: &mut TcpStream) -> Option<Vec<u8>> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_ascii_lowercase();
            let len = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let start = end + 4;
            if buf.len() >= start + len {
                return Some(buf[start..start + len].to_vec());
            }
        }

        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}
