//! Per-connection WebSocket handling.
//!
//! # Data Flow
//! ```text
//! inbound frame ─▶ RequestEnvelope::parse ─┬─ Err ─▶ "Invalid JSON Payload" ─┐
//!                                          └─ Ok ──▶ spawn(router.dispatch) ──┤
//!                                                                              ▼
//!                                          writer task ◀── mpsc ◀── reply frames
//! ```
//!
//! # Design Decisions
//! - One task per frame: slow provider calls never block later frames
//! - Replies may leave out of order; `requestId` is the correlation
//! - A single writer task owns the sink; sends are fire-and-forget

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::Instrument;

use crate::http::server::AppState;
use crate::observability::metrics;
use crate::protocol::{RequestEnvelope, ResponseEnvelope};
use crate::routing::MessageRouter;

/// Serve one upgraded connection until the peer closes or the server stops.
pub async fn handle_socket(socket: WebSocket, state: AppState) {
    let guard = state.connections.track();
    let span = tracing::info_span!("connection", id = %guard.id());

    async move {
        tracing::debug!("WebSocket client connected");
        serve_connection(socket, state).await;
        tracing::debug!("WebSocket client disconnected");
        drop(guard);
    }
    .instrument(span)
    .await
}

async fn serve_connection(socket: WebSocket, state: AppState) {
    let (mut sink, mut stream) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();

    tokio::spawn(
        async move {
            while let Some(message) = rx.recv().await {
                if sink.send(message).await.is_err() {
                    break; // Client disconnected
                }
            }
        }
        .in_current_span(),
    );

    loop {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    handle_frame(text.as_str().as_bytes(), &state.router, &tx);
                }
                Some(Ok(Message::Binary(bytes))) => {
                    handle_frame(&bytes, &state.router, &tx);
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {} // Ping/pong handled by the protocol layer
                Some(Err(e)) => {
                    tracing::debug!(error = %e, "WebSocket receive error");
                    break;
                }
            },
            _ = state.shutdown.wait() => {
                let _ = tx.send(Message::Close(None));
                break;
            }
        }
    }
}

/// Parse a frame and arrange exactly one reply for it.
fn handle_frame(
    payload: &[u8],
    router: &Arc<MessageRouter>,
    tx: &mpsc::UnboundedSender<Message>,
) {
    let request = match RequestEnvelope::parse(payload) {
        Ok(request) => request,
        Err(_) => {
            tracing::debug!(bytes = payload.len(), "Rejected non-JSON frame");
            metrics::record_malformed_frame();
            send_reply(tx, &ResponseEnvelope::malformed());
            return;
        }
    };

    let router = Arc::clone(router);
    let tx = tx.clone();
    tokio::spawn(
        async move {
            let response = router.dispatch(request).await;
            send_reply(&tx, &response);
        }
        .in_current_span(),
    );
}

fn send_reply(tx: &mpsc::UnboundedSender<Message>, response: &ResponseEnvelope) {
    match serde_json::to_string(response) {
        Ok(frame) => {
            if tx.send(Message::Text(frame.into())).is_err() {
                tracing::trace!("Connection closed before reply could be sent");
            }
        }
        Err(e) => tracing::error!(error = %e, "Failed to serialize reply"),
    }
}
