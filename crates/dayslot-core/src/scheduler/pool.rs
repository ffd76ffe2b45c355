//! Working copy of the free-interval pool used during one placement pass.

use crate::energy::EnergyTable;
use crate::timeline::FreeInterval;

/// Mutable pool of free intervals.
///
/// Owned by a single placement call; it starts as a copy of the caller's
/// intervals and is discarded (or handed back) when the pass ends.
#[derive(Debug, Clone)]
pub struct IntervalPool {
    intervals: Vec<FreeInterval>,
    min_remainder: u32,
    table: EnergyTable,
}

impl IntervalPool {
    pub fn new(intervals: Vec<FreeInterval>, min_remainder: u32, table: EnergyTable) -> Self {
        Self {
            intervals,
            min_remainder,
            table,
        }
    }

    pub fn intervals(&self) -> &[FreeInterval] {
        &self.intervals
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Total free minutes left in the pool.
    pub fn free_minutes(&self) -> u32 {
        self.intervals.iter().map(|i| i.duration_minutes).sum()
    }

    /// Take `minutes + buffer` from the front of the interval at `index`.
    ///
    /// The interval is shrunk in place when at least `min_remainder` minutes
    /// are left, otherwise it is removed so it can never be picked again.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn consume(&mut self, index: usize, minutes: u32, buffer: u32) {
        let interval = &self.intervals[index];
        let required = minutes.saturating_add(buffer);
        let remaining = interval.duration_minutes.saturating_sub(required);
        let new_start = interval.start.saturating_add(required);

        let shrunk = if remaining >= self.min_remainder {
            interval.shrink_to(new_start, self.table)
        } else {
            None
        };

        match shrunk {
            Some(shrunk) => self.intervals[index] = shrunk,
            None => {
                self.intervals.remove(index);
            }
        }
    }

    pub fn into_intervals(self) -> Vec<FreeInterval> {
        self.intervals
    }
}
