//! Automatic placement of subtasks into free intervals.
//!
//! This module provides the greedy placement pass:
//! - Orders tasks by priority (complexity weight + energy weight)
//! - Scores every interval that can hold a subtask plus its trailing buffer
//! - Binds the subtask to the best interval and shrinks that interval
//! - Reports subtasks that fit nowhere instead of silently dropping them

mod pool;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::ValidationError;
use crate::schedule::{ScheduledSlot, SchedulingPolicy};
use crate::task::{Subtask, Task};
use crate::timeline::FreeInterval;

pub use pool::IntervalPool;

/// Bonus when the interval energy equals the subtask requirement.
pub const EXACT_ENERGY_BONUS: f64 = 10.0;
/// Bonus when the interval is one tier above the requirement.
pub const ADJACENT_ENERGY_BONUS: f64 = 5.0;
/// Cap on the duration bonus (in hours of interval length).
pub const MAX_DURATION_BONUS: f64 = 2.0;

/// A subtask no interval could hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnplacedSubtask {
    pub task_id: String,
    pub subtask_id: String,
    /// Estimate plus trailing buffer
    pub required_minutes: u32,
}

/// Result of one placement pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementOutcome {
    /// Slots in assignment order (priority, then subtask order)
    pub placed: Vec<ScheduledSlot>,
    pub unplaced: Vec<UnplacedSubtask>,
    /// What was left of the pool afterwards
    pub remaining: Vec<FreeInterval>,
}

impl PlacementOutcome {
    /// Placed slots sorted by start time, for display.
    pub fn chronological(&self) -> Vec<ScheduledSlot> {
        let mut slots = self.placed.clone();
        slots.sort_by_key(|s| s.start_time);
        slots
    }

    /// Total minutes of work placed (buffers excluded).
    pub fn scheduled_minutes(&self) -> u32 {
        self.placed.iter().map(|s| s.duration_minutes()).sum()
    }
}

/// Greedy subtask placement engine.
#[derive(Debug, Clone, Default)]
pub struct PlacementEngine {
    policy: SchedulingPolicy,
}

impl PlacementEngine {
    pub fn new(policy: SchedulingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &SchedulingPolicy {
        &self.policy
    }

    /// Place every incomplete subtask of `tasks` into `intervals`.
    ///
    /// # Arguments
    /// * `tasks` - Tasks to schedule; completed subtasks are skipped
    /// * `intervals` - Free intervals; copied into a private pool
    /// * `date` - Calendar date stamped onto every slot
    ///
    /// # Returns
    /// Placed slots in assignment order plus the subtasks that did not fit.
    /// Neither input is modified.
    pub fn place(
        &self,
        tasks: &[Task],
        intervals: &[FreeInterval],
        date: NaiveDate,
    ) -> Result<PlacementOutcome, ValidationError> {
        for task in tasks {
            task.validate()?;
        }

        let buffer = self.policy.subtask_buffer_minutes;
        let mut pool = IntervalPool::new(
            intervals.to_vec(),
            self.policy.min_remainder_minutes,
            self.policy.energy_table,
        );
        let mut placed = Vec::new();
        let mut unplaced = Vec::new();

        for task in sort_tasks_by_priority(tasks) {
            for subtask in task.incomplete_subtasks() {
                let required = subtask.estimated_minutes.saturating_add(buffer);

                let Some(index) = best_interval(pool.intervals(), subtask, required) else {
                    debug!(task = %task.id, subtask = %subtask.id, required, "no interval fits subtask");
                    unplaced.push(UnplacedSubtask {
                        task_id: task.id.clone(),
                        subtask_id: subtask.id.clone(),
                        required_minutes: required,
                    });
                    continue;
                };

                let start = pool.intervals()[index].start;
                let end = start.saturating_add(subtask.estimated_minutes);
                pool.consume(index, subtask.estimated_minutes, buffer);

                debug!(task = %task.id, subtask = %subtask.id, %start, %end, "placed subtask");
                placed.push(ScheduledSlot {
                    task_id: task.id.clone(),
                    subtask_id: subtask.id.clone(),
                    start_time: start,
                    end_time: end,
                    date,
                    energy_level: subtask.energy_level,
                    location: task.location,
                    buffer_minutes: buffer,
                });
            }
        }

        Ok(PlacementOutcome {
            placed,
            unplaced,
            remaining: pool.into_intervals(),
        })
    }
}

/// Place subtasks with the canonical policy.
pub fn place_subtasks(
    tasks: &[Task],
    intervals: &[FreeInterval],
    date: NaiveDate,
) -> Result<PlacementOutcome, ValidationError> {
    PlacementEngine::default().place(tasks, intervals, date)
}

/// Tasks by descending priority; ties keep input order.
pub fn sort_tasks_by_priority(tasks: &[Task]) -> Vec<&Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by(|a, b| b.priority().cmp(&a.priority()));
    sorted
}

/// Score of placing `subtask` into `interval`.
pub fn score_interval(interval: &FreeInterval, subtask: &Subtask) -> f64 {
    let energy_bonus = if interval.energy_level == subtask.energy_level {
        EXACT_ENERGY_BONUS
    } else if subtask.energy_level.one_above() == Some(interval.energy_level) {
        ADJACENT_ENERGY_BONUS
    } else {
        0.0
    };
    let duration_bonus = (interval.duration_minutes as f64 / 60.0).min(MAX_DURATION_BONUS);
    energy_bonus + duration_bonus
}

/// Index of the highest scoring available interval that can hold `required` minutes.
///
/// Only a strictly higher score replaces the current best, so ties go to
/// the interval that comes first in the pool.
fn best_interval(intervals: &[FreeInterval], subtask: &Subtask, required: u32) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, interval) in intervals.iter().enumerate() {
        if !interval.available || !interval.can_fit(required) {
            continue;
        }
        let score = score_interval(interval, subtask);
        trace!(start = %interval.start, score, "scored interval");
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((index, score));
        }
    }
    best.map(|(index, _)| index)
}
