//! Energy tiers and time-of-day energy inference.
//!
//! Intervals get an energy tag from the hour they start in; subtasks carry
//! the tier they require. The placement engine scores the match between
//! the two.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clock::ClockTime;

/// Energy level for task scheduling.
///
/// Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    /// Low energy (e.g., evening)
    Low,
    /// Medium energy (default)
    Medium,
    /// High energy (e.g., morning)
    High,
}

impl EnergyLevel {
    /// All tiers from lowest to highest.
    pub const ALL: [EnergyLevel; 3] = [EnergyLevel::Low, EnergyLevel::Medium, EnergyLevel::High];

    /// Priority weight: low 1, medium 2, high 3.
    pub fn weight(self) -> u32 {
        match self {
            EnergyLevel::Low => 1,
            EnergyLevel::Medium => 2,
            EnergyLevel::High => 3,
        }
    }

    /// The tier directly above this one, if any.
    pub fn one_above(self) -> Option<EnergyLevel> {
        match self {
            EnergyLevel::Low => Some(EnergyLevel::Medium),
            EnergyLevel::Medium => Some(EnergyLevel::High),
            EnergyLevel::High => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EnergyLevel::Low => "low",
            EnergyLevel::Medium => "medium",
            EnergyLevel::High => "high",
        }
    }
}

impl Default for EnergyLevel {
    fn default() -> Self {
        EnergyLevel::Medium
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for EnergyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(EnergyLevel::Low),
            "medium" => Ok(EnergyLevel::Medium),
            "high" => Ok(EnergyLevel::High),
            other => Err(format!("unknown energy level: {other}")),
        }
    }
}

/// Hour-of-day to energy mapping.
///
/// Exactly one table is active per scheduling policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum EnergyTable {
    /// `[6,10)` high, `[10,17)` medium, `[17,24)` low, anything else low.
    #[default]
    Extended,
    /// `<10` high, `<16` medium, else low.
    Simple,
}

impl EnergyTable {
    /// Energy for a given hour of day.
    pub fn for_hour(self, hour: u32) -> EnergyLevel {
        match self {
            EnergyTable::Extended => match hour {
                6..=9 => EnergyLevel::High,
                10..=16 => EnergyLevel::Medium,
                _ => EnergyLevel::Low,
            },
            EnergyTable::Simple => {
                if hour < 10 {
                    EnergyLevel::High
                } else if hour < 16 {
                    EnergyLevel::Medium
                } else {
                    EnergyLevel::Low
                }
            }
        }
    }

    /// Energy for the hour a time falls in.
    pub fn infer(self, at: ClockTime) -> EnergyLevel {
        self.for_hour(at.hour())
    }
}
