//! Per-tick derived views: table rows, latest reading and the trend fit.
//! Built once per tick and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::reading::Reading;
use crate::regression::{fit_index_series, LinearFit};
use crate::window::SlidingWindow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub index: usize,
    pub temp: f64,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub best_fit: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TabularSnapshot {
    pub rows: Vec<TableRow>,
}

impl TabularSnapshot {
    pub fn columns(&self) -> &'static [&'static str] {
        if self.rows.iter().any(|r| r.best_fit.is_some()) {
            &["#", "temp", "timestamp", "best_fit"]
        } else {
            &["#", "temp", "timestamp"]
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub fit: LinearFit,
    pub fitted: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleResult {
    pub tick: u64,
    pub readings: Vec<Reading>,
    pub table: TabularSnapshot,
    pub latest: Reading,
    pub trend: Option<TrendSeries>,
}

impl CycleResult {
    /// Project the window as it stands after `latest` was appended.
    pub fn derive(tick: u64, window: &SlidingWindow, latest: Reading) -> Self {
        let readings = window.snapshot();
        let values: Vec<f64> = readings.iter().map(Reading::value).collect();
        let trend = fit_index_series(&values).map(|fit| TrendSeries {
            fitted: fit.fitted_over_index(values.len()),
            fit,
        });

        let rows = readings
            .iter()
            .enumerate()
            .map(|(i, r)| TableRow {
                index: i,
                temp: r.value(),
                timestamp: r.timestamp_str(),
                best_fit: trend.as_ref().and_then(|t| t.fitted.get(i).copied()),
            })
            .collect();

        Self {
            tick,
            readings,
            table: TabularSnapshot { rows },
            latest,
            trend,
        }
    }

    pub fn values(&self) -> Vec<f64> {
        self.readings.iter().map(Reading::value).collect()
    }
}
