//! Ordinary least squares over (x, y) pairs, guarded against degenerate input.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Pearson correlation; 0 when y has no variance.
    pub r_value: f64,
}

impl LinearFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// One fitted value per sequence index `0..n`.
    pub fn fitted_over_index(&self, n: usize) -> Vec<f64> {
        (0..n).map(|i| self.predict(i as f64)).collect()
    }
}

/// Fit `ys` against their sequence index. `None` for fewer than two points.
pub fn fit_index_series(ys: &[f64]) -> Option<LinearFit> {
    let xs: Vec<f64> = (0..ys.len()).map(|i| i as f64).collect();
    linregress(&xs, ys)
}

/// `None` when there are fewer than two points, the lengths differ, or x is constant.
pub fn linregress(xs: &[f64], ys: &[f64]) -> Option<LinearFit> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let n = xs.len() as f64;
    let mx = xs.iter().sum::<f64>() / n;
    let my = ys.iter().sum::<f64>() / n;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx <= 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let r_value = if syy > 0.0 {
        (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
    } else {
        0.0
    };
    Some(LinearFit {
        slope,
        intercept: my - slope * mx,
        r_value,
    })
}
