//! Minute-of-day clock values.
//!
//! Every time at the library boundary is a zero-padded 24-hour `HH:MM`
//! string. Internally times are minute-of-day integers so that interval
//! arithmetic stays exact.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::error::ValidationError;

/// Minutes in a day. `24:00` is the only value allowed to reach it.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A time of day with minute resolution (`00:00` ..= `24:00`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(u32);

impl ClockTime {
    /// Midnight at the start of the day.
    pub const MIDNIGHT: ClockTime = ClockTime(0);
    /// End-of-day sentinel.
    pub const END_OF_DAY: ClockTime = ClockTime(MINUTES_PER_DAY);

    /// Build from a minute-of-day count, clamping to `24:00`.
    pub fn from_minutes(minutes: u32) -> Self {
        Self(minutes.min(MINUTES_PER_DAY))
    }

    /// Build from a whole hour.
    pub fn from_hour(hour: u32) -> Self {
        Self::from_minutes(hour * 60)
    }

    /// Build from hour and minute parts.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        if minute >= 60 {
            return None;
        }
        let total = hour.checked_mul(60)?.checked_add(minute)?;
        (total <= MINUTES_PER_DAY).then_some(Self(total))
    }

    /// Parse an `HH:MM` string.
    ///
    /// `field` names the value in the error so callers can tell which input
    /// was rejected.
    pub fn parse(field: &str, value: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidTime {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let (h, m) = value
            .split_once(':')
            .ok_or_else(|| invalid("expected HH:MM"))?;

        if h.is_empty() || h.len() > 2 || m.len() != 2 {
            return Err(invalid("expected HH:MM"));
        }
        if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid("non-numeric component"));
        }

        let hour: u32 = h.parse().map_err(|_| invalid("non-numeric hour"))?;
        let minute: u32 = m.parse().map_err(|_| invalid("non-numeric minute"))?;

        if minute >= 60 {
            return Err(invalid("minute out of range"));
        }
        if hour > 24 || (hour == 24 && minute != 0) {
            return Err(invalid("hour out of range"));
        }

        Ok(Self(hour * 60 + minute))
    }

    /// Minute-of-day value.
    pub fn minutes(self) -> u32 {
        self.0
    }

    /// Hour component (0..=24).
    pub fn hour(self) -> u32 {
        self.0 / 60
    }

    /// Minute component (0..60).
    pub fn minute(self) -> u32 {
        self.0 % 60
    }

    /// Add minutes, saturating at `24:00`.
    pub fn saturating_add(self, minutes: u32) -> Self {
        Self::from_minutes(self.0.saturating_add(minutes))
    }

    /// Subtract minutes, saturating at `00:00`.
    pub fn saturating_sub(self, minutes: u32) -> Self {
        Self(self.0.saturating_sub(minutes))
    }

    /// Minutes from `self` until `later` (0 if `later` is not after `self`).
    pub fn minutes_until(self, later: ClockTime) -> u32 {
        later.0.saturating_sub(self.0)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ClockTime::parse("time", &raw).map_err(serde::de::Error::custom)
    }
}
