//! Shared utilities for integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use pokestat_relay::config::RelayConfig;
use pokestat_relay::{RelayServer, RunningServer};
use serde_json::{json, Value};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

pub type WsClient = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Start a programmable mock provider. `f` receives the request path.
pub async fn start_programmable_provider<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let Some(path) = read_request_path(&mut socket).await else {
                            return;
                        };
                        let (status, body) = f(path).await;
                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn read_request_path(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let head = String::from_utf8_lossy(&buf);
    let request_line = head.lines().next()?;
    request_line.split_whitespace().nth(1).map(str::to_string)
}

/// PokeAPI-shaped stats body.
pub fn stats_body(stats: &[(&str, i64, i64)]) -> String {
    let stats: Vec<Value> = stats
        .iter()
        .map(|(name, base_stat, effort)| {
            json!({
                "base_stat": base_stat,
                "effort": effort,
                "stat": { "name": name, "url": "https://pokeapi.co/api/v2/stat/0/" }
            })
        })
        .collect();
    json!({ "name": "mock", "stats": stats }).to_string()
}

pub fn pikachu_body() -> String {
    stats_body(&[
        ("hp", 35, 0),
        ("attack", 55, 0),
        ("defense", 40, 0),
        ("special-attack", 50, 0),
        ("special-defense", 50, 0),
        ("speed", 90, 2),
    ])
}

/// Mock provider knowing `pikachu` and `snorlax`; `slowpoke` answers after `slow_delay`.
pub async fn start_mock_pokeapi(slow_delay: Duration) -> SocketAddr {
    start_programmable_provider(move |path| async move {
        match path.as_str() {
            "/api/v2/pokemon/pikachu" => (200, pikachu_body()),
            "/api/v2/pokemon/snorlax" => (200, stats_body(&[("hp", 160, 2), ("special-defense", 110, 0)])),
            "/api/v2/pokemon/slowpoke" => {
                tokio::time::sleep(slow_delay).await;
                (200, stats_body(&[("hp", 90, 1)]))
            }
            "/api/v2/pokemon/broken" => (200, "{\"name\":\"broken\"}".to_string()),
            _ => (404, "Not Found".to_string()),
        }
    })
    .await
}

/// Relay config bound to an ephemeral local port, pointed at `provider`.
pub fn relay_config(provider: SocketAddr) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.listener.host = "127.0.0.1".to_string();
    config.listener.port = 0;
    config.provider.base_url = format!("http://{}/api/v2", provider);
    config
}

pub async fn start_relay(config: RelayConfig) -> RunningServer {
    RelayServer::new(config)
        .expect("valid provider config")
        .start()
        .await
        .expect("relay should bind")
}

pub async fn connect(addr: SocketAddr) -> WsClient {
    let (ws, _) = connect_async(format!("ws://{}/", addr))
        .await
        .expect("WebSocket handshake");
    ws
}

pub async fn send_text(ws: &mut WsClient, text: &str) {
    ws.send(Message::Text(text.to_string().into())).await.unwrap();
}

/// Next text frame as JSON, failing the test after five seconds.
pub async fn next_reply(ws: &mut WsClient) -> Value {
    loop {
        let message = tokio::time::timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("reply within timeout")
            .expect("connection open")
            .expect("valid frame");
        if let Message::Text(text) = message {
            return serde_json::from_str(text.as_str()).expect("reply is JSON");
        }
    }
}

/// Send one request and wait for the next reply.
pub async fn request(ws: &mut WsClient, request: Value) -> Value {
    send_text(ws, &request.to_string()).await;
    next_reply(ws).await
}
