//! Tasks and their subtasks.
//!
//! A [`Task`] is what the user thinks about ("clean the garage"); its
//! [`Subtask`]s are what actually gets placed on the day. Subtasks are owned
//! exclusively by their parent and are only ever removed with it.

pub mod breakdown;
pub mod templates;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::clock::MINUTES_PER_DAY;
use crate::error::ValidationError;

pub use crate::energy::EnergyLevel;

/// Physical place a task (or a single subtask) happens in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum TaskLocation {
    Kitchen,
    Bathroom,
    Bedroom,
    LivingRoom,
    Car,
    Garage,
    Storage,
    Office,
    Any,
}

impl TaskLocation {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskLocation::Kitchen => "kitchen",
            TaskLocation::Bathroom => "bathroom",
            TaskLocation::Bedroom => "bedroom",
            TaskLocation::LivingRoom => "living-room",
            TaskLocation::Car => "car",
            TaskLocation::Garage => "garage",
            TaskLocation::Storage => "storage",
            TaskLocation::Office => "office",
            TaskLocation::Any => "any",
        }
    }
}

impl Default for TaskLocation {
    fn default() -> Self {
        TaskLocation::Any
    }
}

impl fmt::Display for TaskLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for TaskLocation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        match normalized.as_str() {
            "kitchen" => Ok(TaskLocation::Kitchen),
            "bathroom" => Ok(TaskLocation::Bathroom),
            "bedroom" => Ok(TaskLocation::Bedroom),
            "living-room" => Ok(TaskLocation::LivingRoom),
            "car" => Ok(TaskLocation::Car),
            "garage" => Ok(TaskLocation::Garage),
            "storage" => Ok(TaskLocation::Storage),
            "office" => Ok(TaskLocation::Office),
            "any" => Ok(TaskLocation::Any),
            other => Err(format!("unknown location: {other}")),
        }
    }
}

/// How involved a task is overall.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskComplexity {
    Simple,
    Moderate,
    Complex,
}

impl TaskComplexity {
    /// Priority weight: simple 1, moderate 2, complex 3.
    pub fn weight(self) -> u32 {
        match self {
            TaskComplexity::Simple => 1,
            TaskComplexity::Moderate => 2,
            TaskComplexity::Complex => 3,
        }
    }
}

impl Default for TaskComplexity {
    fn default() -> Self {
        TaskComplexity::Moderate
    }
}

/// An atomic, schedulable unit of work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    /// Unique within the parent task
    pub id: String,
    pub title: String,
    pub estimated_minutes: u32,
    #[serde(default)]
    pub completed: bool,
    /// Energy the subtask needs
    pub energy_level: EnergyLevel,
    #[serde(default)]
    pub location: Option<TaskLocation>,
    /// Minutes actually spent, recorded on completion
    #[serde(default)]
    pub actual_minutes: Option<u32>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Subtask {
    /// Create an incomplete subtask with a fresh id.
    pub fn new(title: impl Into<String>, estimated_minutes: u32, energy_level: EnergyLevel) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            estimated_minutes,
            completed: false,
            energy_level,
            location: None,
            actual_minutes: None,
            completed_at: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_location(mut self, location: TaskLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Set the completion state.
    ///
    /// Completing stamps `completed_at`; reopening clears it. `actual_minutes`
    /// is replaced by whatever the caller passes in both cases.
    pub fn set_completed(&mut self, completed: bool, actual_minutes: Option<u32>, now: DateTime<Utc>) {
        self.completed = completed;
        self.actual_minutes = actual_minutes;
        self.completed_at = completed.then_some(now);
    }

    pub fn complete(&mut self, actual_minutes: Option<u32>, now: DateTime<Utc>) {
        self.set_completed(true, actual_minutes, now);
    }

    pub fn reopen(&mut self) {
        self.completed = false;
        self.actual_minutes = None;
        self.completed_at = None;
    }

    /// Minutes spent, falling back to the estimate when nothing was recorded.
    /// A recorded zero counts as nothing recorded.
    pub fn time_spent(&self) -> u32 {
        self.actual_minutes
            .filter(|&minutes| minutes > 0)
            .unwrap_or(self.estimated_minutes)
    }
}

/// A user-level unit of work broken into subtasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    /// Overall energy the task demands
    pub energy_level: EnergyLevel,
    pub location: TaskLocation,
    pub complexity: TaskComplexity,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub last_completed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub streak: Option<u32>,
    /// Template this task was instantiated from
    #[serde(default)]
    pub template_id: Option<String>,
}

impl Task {
    /// Create an empty task with a fresh id.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            description: String::new(),
            subtasks: Vec::new(),
            energy_level: EnergyLevel::Medium,
            location: TaskLocation::Any,
            complexity: TaskComplexity::Moderate,
            is_recurring: false,
            last_completed: None,
            streak: None,
            template_id: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_subtasks(mut self, subtasks: Vec<Subtask>) -> Self {
        self.subtasks = subtasks;
        self
    }

    pub fn with_energy(mut self, energy_level: EnergyLevel) -> Self {
        self.energy_level = energy_level;
        self
    }

    pub fn with_location(mut self, location: TaskLocation) -> Self {
        self.location = location;
        self
    }

    pub fn with_complexity(mut self, complexity: TaskComplexity) -> Self {
        self.complexity = complexity;
        self
    }

    /// Scheduling priority: complexity weight plus energy weight (2..=6).
    pub fn priority(&self) -> u32 {
        self.complexity.weight() + self.energy_level.weight()
    }

    /// Sum of all subtask estimates, recomputed on every call.
    pub fn total_estimated_minutes(&self) -> u32 {
        self.subtasks.iter().map(|s| s.estimated_minutes).sum()
    }

    /// Sum of estimates still outstanding.
    pub fn remaining_minutes(&self) -> u32 {
        self.incomplete_subtasks().map(|s| s.estimated_minutes).sum()
    }

    pub fn incomplete_subtasks(&self) -> impl Iterator<Item = &Subtask> {
        self.subtasks.iter().filter(|s| !s.completed)
    }

    pub fn completed_count(&self) -> usize {
        self.subtasks.iter().filter(|s| s.completed).count()
    }

    /// True when every subtask is done (and there is at least one).
    pub fn is_complete(&self) -> bool {
        !self.subtasks.is_empty() && self.subtasks.iter().all(|s| s.completed)
    }

    /// Completed share of subtasks (0.0 to 1.0).
    pub fn completion_ratio(&self) -> f64 {
        if self.subtasks.is_empty() {
            0.0
        } else {
            self.completed_count() as f64 / self.subtasks.len() as f64
        }
    }

    pub fn subtask(&self, subtask_id: &str) -> Option<&Subtask> {
        self.subtasks.iter().find(|s| s.id == subtask_id)
    }

    pub fn subtask_mut(&mut self, subtask_id: &str) -> Option<&mut Subtask> {
        self.subtasks.iter_mut().find(|s| s.id == subtask_id)
    }

    /// Check identifiers: the task id is non-empty and subtask ids are
    /// non-empty and unique within the task. Estimates must fit in a day.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::InvalidValue {
                field: format!("task '{}'.id", self.title),
                message: "id must not be empty".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for subtask in &self.subtasks {
            if subtask.id.trim().is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: format!("task {}.subtasks.id", self.id),
                    message: format!("subtask '{}' has an empty id", subtask.title),
                });
            }
            if !seen.insert(subtask.id.as_str()) {
                return Err(ValidationError::InvalidValue {
                    field: format!("task {}.subtasks.id", self.id),
                    message: format!("duplicate subtask id '{}'", subtask.id),
                });
            }
            if subtask.estimated_minutes > MINUTES_PER_DAY {
                return Err(ValidationError::InvalidValue {
                    field: format!("task {}.subtasks.{}.estimated_minutes", self.id, subtask.id),
                    message: format!("{} minutes does not fit in a day", subtask.estimated_minutes),
                });
            }
        }
        Ok(())
    }
}
