//! Shared agent state: the tick feed, effective config, and hot JSON cache.

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use tempdash_core::{CycleFeed, DashConfig};
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
pub struct CachedJson {
    pub tick: u64,
    pub json: String,
}

#[derive(Clone)]
pub struct AppState {
    pub feed: CycleFeed,
    pub config: Arc<DashConfig>,

    // Last serialized tick result for fast WS responses
    pub last_json: Arc<RwLock<Option<CachedJson>>>,

    pub client_count: Arc<AtomicUsize>,
}

impl AppState {
    pub fn new(feed: CycleFeed, config: DashConfig) -> Self {
        Self {
            feed,
            config: Arc::new(config),
            last_json: Arc::new(RwLock::new(None)),
            client_count: Arc::new(AtomicUsize::new(0)),
        }
    }
}
