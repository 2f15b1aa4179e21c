//! tempdash_agent: runs the tick scheduler and serves results to WebSocket viewers.

pub mod cli;
pub mod sampler;
pub mod state;
pub mod ws;

use axum::{routing::get, Router};

use crate::state::AppState;
use crate::ws::ws_handler;

pub fn router(state: AppState) -> Router {
    Router::new().route("/ws", get(ws_handler)).with_state(state)
}
