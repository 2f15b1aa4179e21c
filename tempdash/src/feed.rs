//! Where the dashboard gets its tick results: an in-process scheduler or a remote agent.

use std::sync::Arc;

use tempdash_core::{CycleFeed, CycleResult, SchedulerHandle};

use crate::ws::AgentConn;

pub enum Feed {
    Local {
        handle: SchedulerHandle,
        feed: CycleFeed,
    },
    Remote {
        url: String,
        conn: AgentConn,
        last_tick: Option<u64>,
    },
}

impl Feed {
    pub fn local(handle: SchedulerHandle) -> Self {
        let feed = handle.feed();
        Feed::Local { handle, feed }
    }

    /// Connect to an agent; also returns its configured window size when it reports one.
    pub async fn remote(url: &str) -> Result<(Self, Option<usize>), Box<dyn std::error::Error>> {
        let mut conn = AgentConn::connect(url).await?;
        let window = conn.request_config().await.map(|c| c.window_size);
        Ok((
            Feed::Remote {
                url: url.to_string(),
                conn,
                last_tick: None,
            },
            window,
        ))
    }

    pub fn label(&self) -> String {
        match self {
            Feed::Local { .. } => "local".into(),
            Feed::Remote { url, .. } => format!("agent {url}"),
        }
    }

    /// A result not yet shown, if one arrived since the last call.
    pub async fn poll(&mut self) -> Option<Arc<CycleResult>> {
        match self {
            Feed::Local { feed, .. } => {
                if feed.has_changed() {
                    feed.mark_seen()
                } else {
                    None
                }
            }
            Feed::Remote { conn, last_tick, .. } => {
                let c = conn.request_cycle().await?;
                if *last_tick == Some(c.tick) {
                    return None;
                }
                *last_tick = Some(c.tick);
                Some(Arc::new(c))
            }
        }
    }

    /// Window bounds that `resize_window` accepts, local mode only.
    pub fn max_window(&self) -> Option<usize> {
        match self {
            Feed::Local { handle, .. } => Some(handle.max_capacity()),
            Feed::Remote { .. } => None,
        }
    }

    pub fn resize_window(&self, capacity: usize) -> Result<(), String> {
        match self {
            Feed::Local { handle, .. } => handle.resize_window(capacity).map_err(|e| e.to_string()),
            Feed::Remote { .. } => Err("window is fixed by the agent".into()),
        }
    }

    pub async fn close(self) {
        match self {
            Feed::Local { handle, .. } => handle.shutdown().await,
            Feed::Remote { conn, .. } => conn.close().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use chrono::NaiveDate;
    use tempdash_core::{Reading, Scheduler, Session, SlidingWindow};

    fn local_feed() -> Feed {
        let ts = NaiveDate::from_ymd_opt(2024, 6, 1)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .unwrap();
        let mut n = 0.0;
        let source = move || {
            n += 1.0;
            Reading::new(n, ts)
        };
        let window = SlidingWindow::new(5, 30).unwrap();
        let sched = Scheduler::new(Session::new(window, source), Duration::from_secs(4)).unwrap();
        Feed::local(sched.spawn())
    }

    #[tokio::test(start_paused = true)]
    async fn local_poll_hands_over_each_tick_once() {
        let mut feed = local_feed();
        assert_eq!(feed.label(), "local");
        assert_eq!(feed.max_window(), Some(30));

        tokio::time::sleep(Duration::from_millis(10)).await;
        let first = feed.poll().await.expect("first tick");
        assert_eq!(first.tick, 1);
        assert!(feed.poll().await.is_none());

        tokio::time::sleep(Duration::from_secs(4)).await;
        let second = feed.poll().await.expect("second tick");
        assert_eq!(second.tick, 2);
        assert_eq!(second.readings.len(), 2);
        assert!(feed.poll().await.is_none());

        feed.close().await;
    }

    #[tokio::test(start_paused = true)]
    async fn local_resize_bounded_by_max() {
        let feed = local_feed();
        assert!(feed.resize_window(3).is_ok());
        assert!(feed.resize_window(31).is_err());
        assert!(feed.resize_window(0).is_err());
        feed.close().await;
    }
}
