//! Background cache: serializes each tick's result once, so WS replies just
//! read and send the cached text.

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::state::{AppState, CachedJson};

pub fn spawn_json_cache(state: AppState) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut feed = state.feed.clone();
        while feed.changed().await {
            let Some(c) = feed.mark_seen() else { continue };
            match serde_json::to_string(&*c) {
                Ok(json) => {
                    *state.last_json.write().await = Some(CachedJson { tick: c.tick, json });
                    debug!(tick = c.tick, "cached tick result");
                }
                Err(e) => warn!("failed to serialize tick {}: {e}", c.tick),
            }
        }
        debug!("feed closed; json cache stopped");
    })
}
