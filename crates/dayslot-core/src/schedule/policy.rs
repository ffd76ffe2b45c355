use serde::{Deserialize, Serialize};

use super::{DayWindow, ObligationKind};
use crate::clock::MINUTES_PER_DAY;
use crate::energy::EnergyTable;
use crate::error::ValidationError;

/// How much time is kept clear around obligations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BufferPolicy {
    /// Work gets 30 minutes on each side, everything else 15.
    /// Gaps shorter than 30 minutes are dropped.
    #[default]
    ByCategory,
    /// 10 minutes on each side of every obligation.
    /// Gaps shorter than 15 minutes are dropped.
    Flat,
}

impl BufferPolicy {
    /// Buffer before and after an obligation of this kind.
    pub fn buffer_for(self, kind: ObligationKind) -> u32 {
        match self {
            BufferPolicy::ByCategory => match kind {
                ObligationKind::Work => 30,
                ObligationKind::Personal | ObligationKind::Appointment => 15,
            },
            BufferPolicy::Flat => 10,
        }
    }

    /// Smallest gap worth emitting as a free interval.
    pub fn granularity(self) -> u32 {
        match self {
            BufferPolicy::ByCategory => 30,
            BufferPolicy::Flat => 15,
        }
    }
}

/// Knobs shared by the availability deriver and the placement engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulingPolicy {
    #[serde(default)]
    pub buffer_policy: BufferPolicy,
    #[serde(default)]
    pub energy_table: EnergyTable,
    #[serde(default = "default_day_start_hour")]
    pub day_start_hour: u32,
    #[serde(default = "default_day_end_hour")]
    pub day_end_hour: u32,
    /// Trailing buffer consumed after every placed subtask
    #[serde(default = "default_subtask_buffer")]
    pub subtask_buffer_minutes: u32,
    /// Intervals shrunk below this are dropped from the pool
    #[serde(default = "default_min_remainder")]
    pub min_remainder_minutes: u32,
}

fn default_day_start_hour() -> u32 {
    6
}
fn default_day_end_hour() -> u32 {
    23
}
fn default_subtask_buffer() -> u32 {
    10
}
fn default_min_remainder() -> u32 {
    15
}

impl Default for SchedulingPolicy {
    fn default() -> Self {
        Self {
            buffer_policy: BufferPolicy::default(),
            energy_table: EnergyTable::default(),
            day_start_hour: default_day_start_hour(),
            day_end_hour: default_day_end_hour(),
            subtask_buffer_minutes: default_subtask_buffer(),
            min_remainder_minutes: default_min_remainder(),
        }
    }
}

impl SchedulingPolicy {
    /// Policy with the flat buffer variant and the simple energy table.
    pub fn simple() -> Self {
        Self {
            buffer_policy: BufferPolicy::Flat,
            energy_table: EnergyTable::Simple,
            ..Self::default()
        }
    }

    /// The configured day window.
    pub fn window(&self) -> Result<DayWindow, ValidationError> {
        DayWindow::from_hours(self.day_start_hour, self.day_end_hour)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.window()?;
        if self.min_remainder_minutes == 0 {
            return Err(ValidationError::InvalidValue {
                field: "scheduling.min_remainder_minutes".to_string(),
                message: "must be at least 1 minute".to_string(),
            });
        }
        if self.subtask_buffer_minutes > MINUTES_PER_DAY {
            return Err(ValidationError::InvalidValue {
                field: "scheduling.subtask_buffer_minutes".to_string(),
                message: format!("must be at most {MINUTES_PER_DAY} minutes"),
            });
        }
        Ok(())
    }
}
