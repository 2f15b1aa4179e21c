//! Synthetic sample generation: one reading per call, never fails.

use chrono::{Local, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{DashError, Result};
use crate::reading::Reading;

/// Anything that can hand the scheduler a fresh reading each tick.
pub trait SampleSource {
    fn sample(&mut self) -> Reading;
}

impl<F> SampleSource for F
where
    F: FnMut() -> Reading,
{
    fn sample(&mut self) -> Reading {
        self()
    }
}

pub struct TemperatureGenerator {
    rng: StdRng,
    min: f64,
    max: f64,
}

impl TemperatureGenerator {
    /// Uniform values in `min..=max`. `seed` pins the sequence for reproducible runs.
    pub fn new(min: f64, max: f64, seed: Option<u64>) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() || min > max {
            return Err(DashError::Config(format!(
                "invalid value range {min}..={max}"
            )));
        }
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Ok(Self { rng, min, max })
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Draw one value paired with an explicit timestamp.
    pub fn sample_at(&mut self, now: NaiveDateTime) -> Reading {
        let raw = self.rng.gen_range(self.min..=self.max);
        Reading::new(round_tenths(raw), now)
    }
}

impl SampleSource for TemperatureGenerator {
    fn sample(&mut self) -> Reading {
        self.sample_at(Local::now().naive_local())
    }
}

fn round_tenths(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_stay_in_range_with_one_decimal() {
        let mut g = TemperatureGenerator::new(0.0, 100.0, Some(7)).unwrap();
        for _ in 0..500 {
            let v = g.sample().value();
            assert!((0.0..=100.0).contains(&v), "out of range: {v}");
            let scaled = v * 10.0;
            assert!((scaled - scaled.round()).abs() < 1e-9, "not rounded: {v}");
        }
    }

    #[test]
    fn same_seed_same_values() {
        let mut a = TemperatureGenerator::new(0.0, 100.0, Some(99)).unwrap();
        let mut b = TemperatureGenerator::new(0.0, 100.0, Some(99)).unwrap();
        let va: Vec<f64> = (0..10).map(|_| a.sample().value()).collect();
        let vb: Vec<f64> = (0..10).map(|_| b.sample().value()).collect();
        assert_eq!(va, vb);
    }

    #[test]
    fn degenerate_range_is_constant() {
        let mut g = TemperatureGenerator::new(21.5, 21.5, None).unwrap();
        assert_eq!(g.sample().value(), 21.5);
    }

    #[test]
    fn inverted_or_nan_range_rejected() {
        assert!(TemperatureGenerator::new(10.0, 0.0, None).is_err());
        assert!(TemperatureGenerator::new(f64::NAN, 1.0, None).is_err());
    }

    #[test]
    fn closures_are_sources() {
        let ts = Local::now().naive_local();
        let mut n = 0.0;
        let mut src = move || {
            n += 1.0;
            Reading::new(n, ts)
        };
        assert_eq!(src.sample().value(), 1.0);
        assert_eq!(src.sample().value(), 2.0);
    }
}
