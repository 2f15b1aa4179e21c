//! WebSocket upgrade and per-connection handler. Serves cached JSON quickly.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::stream::StreamExt;
use std::sync::atomic::Ordering;
use tracing::{debug, info};

use crate::state::AppState;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    let n = state.client_count.fetch_add(1, Ordering::Relaxed) + 1;
    info!(clients = n, "viewer connected");

    // Ensure we decrement on disconnect (drop).
    struct ClientGuard(AppState);
    impl Drop for ClientGuard {
        fn drop(&mut self) {
            let n = self.0.client_count.fetch_sub(1, Ordering::Relaxed) - 1;
            info!(clients = n, "viewer disconnected");
        }
    }
    let _guard = ClientGuard(state.clone());

    while let Some(Ok(msg)) = socket.next().await {
        match msg {
            Message::Text(text) if text == "get_cycle" => {
                let reply = current_cycle_json(&state).await;
                if socket.send(Message::Text(reply)).await.is_err() {
                    break;
                }
            }
            Message::Text(text) if text == "get_config" => {
                let reply = serde_json::to_string(&*state.config).unwrap_or_default();
                if socket.send(Message::Text(reply)).await.is_err() {
                    break;
                }
            }
            Message::Close(_) => break,
            other => debug!("ignoring message: {other:?}"),
        }
    }
}

/// JSON for the tick currently published; `null` before the first tick.
pub async fn current_cycle_json(state: &AppState) -> String {
    let Some(current) = state.feed.current_cycle_result() else {
        return "null".into();
    };
    if let Some(cached) = state.last_json.read().await.as_ref() {
        if cached.tick == current.tick {
            return cached.json.clone();
        }
    }
    // Cache still catching up with a fresh tick.
    serde_json::to_string(&*current).unwrap_or_else(|_| "null".into())
}
