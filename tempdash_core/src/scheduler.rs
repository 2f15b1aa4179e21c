//! Periodic driver: fires the session on a fixed interval and publishes each
//! result into a single-slot watch channel. Readers only ever see whole results.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::DashConfig;
use crate::cycle::Session;
use crate::error::{DashError, Result};
use crate::generator::{SampleSource, TemperatureGenerator};
use crate::snapshot::CycleResult;
use crate::window::SlidingWindow;

type Slot = Option<Arc<CycleResult>>;

enum Command {
    Resize(usize),
}

pub struct Scheduler<S> {
    session: Session<S>,
    period: Duration,
}

impl Scheduler<TemperatureGenerator> {
    pub fn from_config(cfg: &DashConfig) -> Result<Self> {
        cfg.validate()?;
        let window = SlidingWindow::new(cfg.window_size, cfg.max_window_size)?;
        let generator = TemperatureGenerator::new(cfg.value_min, cfg.value_max, cfg.seed)?;
        Self::new(Session::new(window, generator), cfg.interval())
    }
}

impl<S: SampleSource + Send + 'static> Scheduler<S> {
    pub fn new(session: Session<S>, period: Duration) -> Result<Self> {
        if period.is_zero() {
            return Err(DashError::Config("tick interval must be non-zero".into()));
        }
        Ok(Self { session, period })
    }

    /// Start ticking on the current tokio runtime. The first tick fires immediately.
    pub fn spawn(self) -> SchedulerHandle {
        let (tx, rx) = watch::channel::<Slot>(None);
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let shutdown = Arc::new(Notify::new());
        let max_capacity = self.session.window().max_capacity();
        let task = tokio::spawn(run(self.session, self.period, tx, cmd_rx, shutdown.clone()));
        SchedulerHandle {
            feed: CycleFeed { rx },
            commands: cmd_tx,
            shutdown,
            task: Some(task),
            max_capacity,
        }
    }
}

async fn run<S: SampleSource>(
    mut session: Session<S>,
    period: Duration,
    tx: watch::Sender<Slot>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    shutdown: Arc<Notify>,
) {
    let mut ticker = interval(period);
    // A stalled runtime should not replay a burst of ticks.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(
        period_ms = period.as_millis() as u64,
        capacity = session.window().capacity(),
        "scheduler started"
    );

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                while let Ok(cmd) = commands.try_recv() {
                    match cmd {
                        Command::Resize(n) => match session.resize_window(n) {
                            Ok(()) => debug!(capacity = n, "window resized"),
                            Err(e) => warn!("resize ignored: {e}"),
                        },
                    }
                }
                let result = Arc::new(session.tick());
                tx.send_replace(Some(result));
            }
            _ = shutdown.notified() => break,
        }
    }

    info!(ticks = session.ticks(), "scheduler stopped");
}

/// Owner side of a running scheduler. Dropping it stops the ticks.
pub struct SchedulerHandle {
    feed: CycleFeed,
    commands: mpsc::UnboundedSender<Command>,
    shutdown: Arc<Notify>,
    task: Option<JoinHandle<()>>,
    max_capacity: usize,
}

impl SchedulerHandle {
    pub fn feed(&self) -> CycleFeed {
        self.feed.clone()
    }

    /// Queue a capacity change; it takes effect on the next tick.
    pub fn resize_window(&self, capacity: usize) -> Result<()> {
        if capacity == 0 || capacity > self.max_capacity {
            return Err(DashError::InvalidCapacity {
                requested: capacity,
                max: self.max_capacity,
            });
        }
        self.commands
            .send(Command::Resize(capacity))
            .map_err(|_| DashError::Config("scheduler is no longer running".into()))
    }

    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    pub async fn shutdown(mut self) {
        self.shutdown.notify_one();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        self.shutdown.notify_one();
    }
}

/// Read side. Cheap to clone; every clone sees the same published results.
#[derive(Clone)]
pub struct CycleFeed {
    rx: watch::Receiver<Slot>,
}

impl CycleFeed {
    /// The current tick's result. Repeated calls between ticks return the same `Arc`.
    /// `None` until the first tick.
    pub fn current_cycle_result(&self) -> Option<Arc<CycleResult>> {
        self.rx.borrow().clone()
    }

    /// Wait for the next tick. `false` once the scheduler has stopped.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Whether a tick happened since the last `changed`/`mark_seen`.
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Take the current result and mark it seen.
    pub fn mark_seen(&mut self) -> Option<Arc<CycleResult>> {
        self.rx.borrow_and_update().clone()
    }
}
