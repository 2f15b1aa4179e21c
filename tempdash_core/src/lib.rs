//! Core of tempdash: synthetic readings, the bounded sliding window, and the
//! per-tick derived views published to dashboards.

pub mod config;
pub mod cycle;
pub mod error;
pub mod generator;
pub mod reading;
pub mod regression;
pub mod scheduler;
pub mod snapshot;
pub mod window;

pub use config::{ConfigOverrides, DashConfig};
pub use cycle::Session;
pub use error::{DashError, Result};
pub use generator::{SampleSource, TemperatureGenerator};
pub use reading::Reading;
pub use regression::LinearFit;
pub use scheduler::{CycleFeed, Scheduler, SchedulerHandle};
pub use snapshot::{CycleResult, TableRow, TabularSnapshot, TrendSeries};
pub use window::SlidingWindow;
