//! Bounded reading history. Oldest-first, FIFO eviction at capacity.

use std::collections::VecDeque;

use crate::error::{DashError, Result};
use crate::reading::Reading;

/// Hard ceiling on any window's capacity.
pub const WINDOW_CEILING: usize = 30;

/// Append `v`, dropping from the front until the deque fits `cap`.
pub fn push_capped<T>(dq: &mut VecDeque<T>, v: T, cap: usize) {
    if cap == 0 {
        return;
    }
    while dq.len() >= cap {
        dq.pop_front();
    }
    dq.push_back(v);
}

#[derive(Debug, Clone)]
pub struct SlidingWindow {
    readings: VecDeque<Reading>,
    capacity: usize,
    max_capacity: usize,
}

impl SlidingWindow {
    /// `capacity` must lie in `1..=max_capacity`, and `max_capacity` in `1..=WINDOW_CEILING`.
    pub fn new(capacity: usize, max_capacity: usize) -> Result<Self> {
        check_capacity(max_capacity, WINDOW_CEILING)?;
        check_capacity(capacity, max_capacity)?;
        Ok(Self {
            readings: VecDeque::new(),
            capacity,
            max_capacity,
        })
    }

    pub fn push(&mut self, r: Reading) {
        push_capped(&mut self.readings, r, self.capacity);
    }

    /// Ordered copy of the current contents, oldest first.
    pub fn snapshot(&self) -> Vec<Reading> {
        self.readings.iter().copied().collect()
    }

    pub fn latest(&self) -> Option<&Reading> {
        self.readings.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Reading> {
        self.readings.iter()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Change capacity; shrinking evicts the oldest readings. Rejected values leave the window as-is.
    pub fn resize(&mut self, capacity: usize) -> Result<()> {
        check_capacity(capacity, self.max_capacity)?;
        while self.readings.len() > capacity {
            self.readings.pop_front();
        }
        self.capacity = capacity;
        Ok(())
    }
}

fn check_capacity(requested: usize, max: usize) -> Result<()> {
    if requested == 0 || requested > max {
        return Err(DashError::InvalidCapacity { requested, max });
    }
    Ok(())
}
