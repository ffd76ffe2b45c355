//! Focus mode: the short queue of what to work on next, and a pausable
//! session clock that measures actual minutes for one subtask.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running <-> Paused -> Finished
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::energy::EnergyLevel;
use crate::task::{Task, TaskLocation};

/// Default number of subtasks shown in focus mode.
pub const DEFAULT_QUEUE_LENGTH: usize = 3;

/// One incomplete subtask with its parent's context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusItem {
    pub task_id: String,
    pub task_title: String,
    pub task_location: TaskLocation,
    pub subtask_id: String,
    pub title: String,
    pub estimated_minutes: u32,
    pub energy_level: EnergyLevel,
}

/// First `limit` incomplete subtasks, in task order then subtask order.
pub fn focus_queue(tasks: &[Task], limit: usize) -> Vec<FocusItem> {
    tasks
        .iter()
        .flat_map(|task| {
            task.incomplete_subtasks().map(move |subtask| FocusItem {
                task_id: task.id.clone(),
                task_title: task.title.clone(),
                task_location: task.location,
                subtask_id: subtask.id.clone(),
                title: subtask.title.clone(),
                estimated_minutes: subtask.estimated_minutes,
                energy_level: subtask.energy_level,
            })
        })
        .take(limit)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Idle,
    Running,
    Paused,
    Finished,
}

/// Wall-clock timer for a single focus item.
///
/// No internal thread; every transition takes the current time from the
/// caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusSession {
    item: FocusItem,
    state: SessionState,
    /// Seconds accumulated in earlier running stretches
    accumulated_secs: i64,
    resumed_at: Option<DateTime<Utc>>,
}

impl FocusSession {
    pub fn new(item: FocusItem) -> Self {
        Self {
            item,
            state: SessionState::Idle,
            accumulated_secs: 0,
            resumed_at: None,
        }
    }

    pub fn item(&self) -> &FocusItem {
        &self.item
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn start(&mut self, now: DateTime<Utc>) {
        if self.state == SessionState::Idle {
            self.state = SessionState::Running;
            self.resumed_at = Some(now);
        }
    }

    pub fn pause(&mut self, now: DateTime<Utc>) {
        if self.state == SessionState::Running {
            self.flush(now);
            self.state = SessionState::Paused;
        }
    }

    pub fn resume(&mut self, now: DateTime<Utc>) {
        if self.state == SessionState::Paused {
            self.state = SessionState::Running;
            self.resumed_at = Some(now);
        }
    }

    /// Seconds spent running so far.
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> i64 {
        let running = match (self.state, self.resumed_at) {
            (SessionState::Running, Some(since)) => (now - since).num_seconds().max(0),
            _ => 0,
        };
        self.accumulated_secs + running
    }

    /// Stop the clock and return whole minutes spent, rounded up.
    ///
    /// A session that never started reports zero.
    pub fn finish(&mut self, now: DateTime<Utc>) -> u32 {
        self.flush(now);
        self.state = SessionState::Finished;
        let secs = u32::try_from(self.accumulated_secs).unwrap_or(u32::MAX);
        secs.div_ceil(60)
    }

    fn flush(&mut self, now: DateTime<Utc>) {
        if let Some(since) = self.resumed_at.take() {
            self.accumulated_secs += (now - since).num_seconds().max(0);
        }
    }
}
