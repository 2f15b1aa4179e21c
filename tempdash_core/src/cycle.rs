//! One tick = generate one reading, append it, derive the views.

use tracing::debug;

use crate::error::Result;
use crate::generator::SampleSource;
use crate::snapshot::CycleResult;
use crate::window::SlidingWindow;

/// Sole owner and writer of a window.
pub struct Session<S> {
    window: SlidingWindow,
    source: S,
    ticks: u64,
}

impl<S: SampleSource> Session<S> {
    pub fn new(window: SlidingWindow, source: S) -> Self {
        Self {
            window,
            source,
            ticks: 0,
        }
    }

    pub fn tick(&mut self) -> CycleResult {
        let reading = self.source.sample();
        self.window.push(reading);
        self.ticks += 1;
        debug!(
            tick = self.ticks,
            temp = reading.value(),
            len = self.window.len(),
            "tick"
        );
        CycleResult::derive(self.ticks, &self.window, reading)
    }

    pub fn resize_window(&mut self, capacity: usize) -> Result<()> {
        self.window.resize(capacity)
    }

    pub fn window(&self) -> &SlidingWindow {
        &self.window
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
