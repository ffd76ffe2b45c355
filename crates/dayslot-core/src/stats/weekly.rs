//! Weekly review numbers computed from the current task list.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::energy::EnergyLevel;
use crate::task::{Task, TaskLocation};

/// Summary shown in the weekly review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyStats {
    /// Tasks with at least one completed subtask
    pub tasks_completed: usize,
    pub subtasks_completed: usize,
    /// Subtasks still open
    pub subtasks_skipped: usize,
    /// Minutes spent on completed subtasks (actual, else estimate)
    pub total_time_spent: u32,
    /// Estimated minutes of completed subtasks
    pub total_estimated_time: u32,
    /// Mean minutes per completed subtask
    pub average_task_time: f64,
    /// Longest streak recorded on any task
    pub streak_days: u32,
    /// Completed subtasks per energy tier
    pub energy_distribution: BTreeMap<EnergyLevel, usize>,
    /// Best completion percentage (0-100) among tasks at each location
    pub location_efficiency: BTreeMap<TaskLocation, f64>,
}

impl WeeklyStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed: Vec<_> = tasks
            .iter()
            .flat_map(|t| t.subtasks.iter().filter(|s| s.completed))
            .collect();

        let total_time_spent: u32 = completed.iter().map(|s| s.time_spent()).sum();
        let total_estimated_time: u32 = completed.iter().map(|s| s.estimated_minutes).sum();
        let average_task_time = if completed.is_empty() {
            0.0
        } else {
            total_time_spent as f64 / completed.len() as f64
        };

        let mut energy_distribution = BTreeMap::new();
        for subtask in &completed {
            *energy_distribution.entry(subtask.energy_level).or_insert(0) += 1;
        }

        let mut location_efficiency: BTreeMap<TaskLocation, f64> = BTreeMap::new();
        for task in tasks {
            let efficiency = task.completion_ratio() * 100.0;
            let best = location_efficiency.entry(task.location).or_insert(0.0);
            *best = best.max(efficiency);
        }

        Self {
            tasks_completed: tasks.iter().filter(|t| t.completed_count() > 0).count(),
            subtasks_completed: completed.len(),
            subtasks_skipped: tasks.iter().map(|t| t.incomplete_subtasks().count()).sum(),
            total_time_spent,
            total_estimated_time,
            average_task_time,
            streak_days: tasks.iter().filter_map(|t| t.streak).max().unwrap_or(0),
            energy_distribution,
            location_efficiency,
        }
    }

    /// Estimated over spent minutes; 1.0 means estimates were exact.
    ///
    /// Returns `None` when nothing has been completed yet.
    pub fn estimate_accuracy(&self) -> Option<f64> {
        if self.total_time_spent == 0 {
            return None;
        }
        Some(self.total_estimated_time as f64 / self.total_time_spent as f64)
    }

    /// Tier with the most completed subtasks. Ties go to the higher tier.
    pub fn dominant_energy(&self) -> Option<EnergyLevel> {
        self.energy_distribution
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(level, _)| *level)
    }

    /// Location with the highest efficiency. Ties go to the first location.
    pub fn best_location(&self) -> Option<TaskLocation> {
        let mut best: Option<(TaskLocation, f64)> = None;
        for (location, efficiency) in &self.location_efficiency {
            if best.map_or(true, |(_, b)| *efficiency > b) {
                best = Some((*location, *efficiency));
            }
        }
        best.map(|(location, _)| location)
    }
}
