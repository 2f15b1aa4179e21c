//! Agent client against a scripted in-process WebSocket server.

use std::time::Duration;

use chrono::NaiveDate;
use futures_util::{SinkExt, StreamExt};
use tempdash::ws::{AgentConn, REPLY_TIMEOUT};
use tempdash_core::{CycleResult, DashConfig, Reading, SlidingWindow};
use tokio::net::TcpListener;
use tokio_tungstenite::{accept_async, tungstenite::Message};

fn cycle() -> CycleResult {
    let ts = NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap();
    let mut w = SlidingWindow::new(5, 30).unwrap();
    let r = Reading::new(71.3, ts);
    w.push(r);
    CycleResult::derive(7, &w, r)
}

/// Serves one connection; the first reply is held back past the client's timeout.
async fn slow_first_reply_agent() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut ws = accept_async(stream).await.unwrap();
        let mut first = true;
        while let Some(Ok(Message::Text(req))) = ws.next().await {
            if first {
                tokio::time::sleep(REPLY_TIMEOUT + Duration::from_millis(500)).await;
                first = false;
            }
            let reply = match req.as_str() {
                "get_config" => serde_json::to_string(&DashConfig::default()).unwrap(),
                "get_cycle" => serde_json::to_string(&cycle()).unwrap(),
                _ => "null".into(),
            };
            if ws.send(Message::Text(reply)).await.is_err() {
                break;
            }
        }
    });
    format!("ws://{addr}/ws")
}

#[tokio::test]
async fn late_reply_is_skipped_not_read_as_next_answer() {
    let url = slow_first_reply_agent().await;
    let mut conn = AgentConn::connect(&url).await.expect("connect");

    assert!(conn.request_config().await.is_none());

    // The late config reply arrives first and must be discarded.
    let c = conn.request_cycle().await.expect("cycle after timeout");
    assert_eq!(c.tick, 7);
    assert_eq!(c.latest.value(), 71.3);

    let cfg = conn.request_config().await.expect("config in step again");
    assert_eq!(cfg, DashConfig::default());
    conn.close().await;
}
