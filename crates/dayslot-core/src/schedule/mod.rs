//! Schedule types: fixed obligations, the day window and placed slots.

mod policy;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clock::ClockTime;
use crate::energy::EnergyLevel;
use crate::error::ValidationError;
use crate::task::TaskLocation;

pub use policy::{BufferPolicy, SchedulingPolicy};

/// Day-of-week tag for weekly obligations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn as_str(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<chrono::Weekday>()
            .map(Weekday::from)
            .map_err(|_| format!("unknown weekday: {s}"))
    }
}

/// Category of a fixed obligation; decides the buffer kept around it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ObligationKind {
    Work,
    Personal,
    Appointment,
}

impl fmt::Display for ObligationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ObligationKind::Work => "work",
            ObligationKind::Personal => "personal",
            ObligationKind::Appointment => "appointment",
        })
    }
}

/// A fixed, non-movable commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obligation {
    pub id: String,
    pub title: String,
    pub start_time: ClockTime,
    pub end_time: ClockTime,
    pub category: ObligationKind,
    /// Weekly obligations carry the day they recur on.
    #[serde(default)]
    pub day: Option<Weekday>,
}

impl Obligation {
    /// Create an untagged obligation.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start_time: ClockTime,
        end_time: ClockTime,
        category: ObligationKind,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start_time,
            end_time,
            category,
            day: None,
        }
    }

    /// Create from `HH:MM` strings, validating both times and their order.
    pub fn parse(
        id: impl Into<String>,
        title: impl Into<String>,
        start_time: &str,
        end_time: &str,
        category: ObligationKind,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        let start = ClockTime::parse(&format!("obligation {id}.start_time"), start_time)?;
        let end = ClockTime::parse(&format!("obligation {id}.end_time"), end_time)?;
        let obligation = Self::new(id, title, start, end, category);
        obligation.validate()?;
        Ok(obligation)
    }

    pub fn on(mut self, day: Weekday) -> Self {
        self.day = Some(day);
        self
    }

    /// Whether the obligation applies to the requested day.
    ///
    /// `None` is the single-day view where every obligation applies; a
    /// concrete weekday selects untagged obligations plus those tagged with it.
    /// Untagged obligations recur daily, so they never drop out of a named day.
    pub fn applies_on(&self, day: Option<Weekday>) -> bool {
        match (day, self.day) {
            (None, _) | (Some(_), None) => true,
            (Some(wanted), Some(tag)) => wanted == tag,
        }
    }

    pub fn duration_minutes(&self) -> u32 {
        self.start_time.minutes_until(self.end_time)
    }

    /// Start must be strictly before end.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start_time >= self.end_time {
            return Err(ValidationError::InvalidTimeRange {
                field: format!("obligation {}", self.id),
                start: self.start_time.to_string(),
                end: self.end_time.to_string(),
            });
        }
        Ok(())
    }

    /// True when the two obligations share at least one minute.
    pub fn overlaps(&self, other: &Obligation) -> bool {
        self.start_time < other.end_time && other.start_time < self.end_time
    }
}

/// The span of the day the deriver may hand out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    pub start: ClockTime,
    pub end: ClockTime,
}

impl DayWindow {
    /// Window from whole hours; `start_hour < end_hour <= 24`.
    pub fn from_hours(start_hour: u32, end_hour: u32) -> Result<Self, ValidationError> {
        if start_hour >= end_hour || end_hour > 24 {
            return Err(ValidationError::InvalidDayWindow {
                start_hour,
                end_hour,
            });
        }
        Ok(Self {
            start: ClockTime::from_hour(start_hour),
            end: ClockTime::from_hour(end_hour),
        })
    }

    pub fn duration_minutes(&self) -> u32 {
        self.start.minutes_until(self.end)
    }
}

/// One subtask bound to one span of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledSlot {
    pub task_id: String,
    pub subtask_id: String,
    pub start_time: ClockTime,
    /// Start plus the subtask estimate; the trailing buffer is not included.
    pub end_time: ClockTime,
    pub date: NaiveDate,
    pub energy_level: EnergyLevel,
    pub location: TaskLocation,
    pub buffer_minutes: u32,
}

impl ScheduledSlot {
    pub fn duration_minutes(&self) -> u32 {
        self.start_time.minutes_until(self.end_time)
    }
}
