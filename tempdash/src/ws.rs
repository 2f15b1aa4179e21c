//! Minimal WebSocket client for requesting tick results from the agent.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::debug;

use tempdash_core::{CycleResult, DashConfig};

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub const REPLY_TIMEOUT: Duration = Duration::from_secs(2);

/// One request in flight at a time; the agent answers in request order.
pub struct AgentConn {
    ws: WsStream,
    // Replies still owed for requests that timed out.
    stale: usize,
}

impl AgentConn {
    // Connect to the agent and wrap the WS stream
    pub async fn connect(url: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let (ws, _) = connect_async(url).await?;
        Ok(Self { ws, stale: 0 })
    }

    async fn request_json<T: serde::de::DeserializeOwned>(&mut self, req: &str) -> Option<T> {
        if self.ws.send(Message::Text(req.into())).await.is_err() {
            return None;
        }
        let Self { ws, stale } = self;
        let reply = timeout(REPLY_TIMEOUT, async {
            while let Some(Ok(msg)) = ws.next().await {
                if let Message::Text(json) = msg {
                    if *stale > 0 {
                        *stale -= 1;
                        continue;
                    }
                    return Some(json);
                }
            }
            None
        })
        .await;
        match reply {
            Ok(json) => serde_json::from_str::<T>(&json?).ok(),
            Err(_) => {
                *stale += 1;
                debug!(request = req, owed = *stale, "agent reply timed out");
                None
            }
        }
    }

    // Send a "get_cycle" request and await the current tick's result
    pub async fn request_cycle(&mut self) -> Option<CycleResult> {
        self.request_json("get_cycle").await
    }

    // The agent's effective settings (window size, interval)
    pub async fn request_config(&mut self) -> Option<DashConfig> {
        self.request_json("get_config").await
    }

    pub async fn close(mut self) {
        let _ = self.ws.close(None).await;
    }
}
