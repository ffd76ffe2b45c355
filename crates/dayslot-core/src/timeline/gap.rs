//! Free interval derivation between fixed obligations.
//!
//! Finds the time left between obligations (plus the buffers they demand)
//! that is long enough to schedule work into.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::ClockTime;
use crate::energy::{EnergyLevel, EnergyTable};
use crate::error::ValidationError;
use crate::schedule::{DayWindow, Obligation, SchedulingPolicy, Weekday};

/// A contiguous span of unscheduled time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeInterval {
    pub start: ClockTime,
    pub end: ClockTime,
    /// Always `end - start`
    pub duration_minutes: u32,
    pub available: bool,
    /// Energy inferred from the start hour
    pub energy_level: EnergyLevel,
    /// Buffer of the obligation that opens this interval (0 at day start)
    pub buffer_before: u32,
    /// Buffer of the obligation that closes this interval (0 at day end)
    pub buffer_after: u32,
}

impl FreeInterval {
    /// Create an interval, tagging it with the energy for its start hour.
    pub fn new(
        start: ClockTime,
        end: ClockTime,
        table: EnergyTable,
        buffer_before: u32,
        buffer_after: u32,
    ) -> Self {
        Self {
            start,
            end,
            duration_minutes: start.minutes_until(end),
            available: true,
            energy_level: table.infer(start),
            buffer_before,
            buffer_after,
        }
    }

    /// Check if this interval can hold `minutes` of work
    pub fn can_fit(&self, minutes: u32) -> bool {
        self.duration_minutes >= minutes
    }

    /// Move the start forward, keeping duration and energy consistent.
    ///
    /// Returns `None` when nothing would be left.
    pub fn shrink_to(&self, new_start: ClockTime, table: EnergyTable) -> Option<FreeInterval> {
        if new_start >= self.end {
            return None;
        }
        let start = new_start.max(self.start);
        Some(FreeInterval {
            start,
            duration_minutes: start.minutes_until(self.end),
            energy_level: table.infer(start),
            ..self.clone()
        })
    }

    /// True when both intervals share at least one minute.
    pub fn overlaps(&self, other: &FreeInterval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// Derives free intervals for one day.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityDeriver {
    policy: SchedulingPolicy,
}

impl AvailabilityDeriver {
    pub fn new(policy: SchedulingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &SchedulingPolicy {
        &self.policy
    }

    /// Derive intervals for `day` inside the policy's day window.
    pub fn derive(
        &self,
        obligations: &[Obligation],
        day: Option<Weekday>,
    ) -> Result<Vec<FreeInterval>, ValidationError> {
        let window = self.policy.window()?;
        self.derive_in(obligations, day, window)
    }

    /// Derive intervals for `day` inside an explicit window.
    ///
    /// # Errors
    /// Fails before computing anything if an obligation ends before it starts
    /// or two of the day's obligations overlap.
    ///
    /// # Returns
    /// Intervals in chronological order, pairwise disjoint, each at least
    /// the policy granularity long.
    pub fn derive_in(
        &self,
        obligations: &[Obligation],
        day: Option<Weekday>,
        window: DayWindow,
    ) -> Result<Vec<FreeInterval>, ValidationError> {
        let mut todays: Vec<&Obligation> = obligations.iter().filter(|o| o.applies_on(day)).collect();
        for obligation in &todays {
            obligation.validate()?;
        }

        todays.sort_by_key(|o| (o.start_time, o.end_time));

        for pair in todays.windows(2) {
            if pair[0].overlaps(pair[1]) {
                return Err(ValidationError::OverlappingObligations {
                    first: pair[0].id.clone(),
                    second: pair[1].id.clone(),
                });
            }
        }

        let buffers = self.policy.buffer_policy;
        let table = self.policy.energy_table;
        let granularity = buffers.granularity();

        // A long buffer on a later obligation can reach back past an earlier,
        // shorter one, so each gap ends at the earliest buffered start still ahead.
        let mut fences: Vec<(ClockTime, u32)> = todays
            .iter()
            .map(|o| {
                let buffer = buffers.buffer_for(o.category);
                (o.start_time.saturating_sub(buffer), buffer)
            })
            .collect();
        for i in (0..fences.len().saturating_sub(1)).rev() {
            if fences[i + 1].0 < fences[i].0 {
                fences[i] = fences[i + 1];
            }
        }

        let mut intervals = Vec::new();
        let mut cursor = window.start;
        let mut opened_by = 0;

        for (obligation, &(fence, fence_buffer)) in todays.iter().zip(&fences) {
            let (gap_end, closed_by) = if fence > window.end {
                (window.end, 0)
            } else {
                (fence, fence_buffer)
            };
            self.push_gap(&mut intervals, cursor, gap_end, opened_by, closed_by, granularity, table);

            let buffer = buffers.buffer_for(obligation.category);
            let next = obligation.end_time.saturating_add(buffer);
            if next > cursor {
                cursor = next;
                opened_by = buffer;
            }
        }

        self.push_gap(&mut intervals, cursor, window.end, opened_by, 0, granularity, table);

        debug!(
            obligations = todays.len(),
            intervals = intervals.len(),
            "derived free intervals"
        );
        Ok(intervals)
    }

    #[allow(clippy::too_many_arguments)]
    fn push_gap(
        &self,
        intervals: &mut Vec<FreeInterval>,
        start: ClockTime,
        end: ClockTime,
        buffer_before: u32,
        buffer_after: u32,
        granularity: u32,
        table: EnergyTable,
    ) {
        if start >= end {
            return;
        }
        let minutes = start.minutes_until(end);
        if minutes < granularity {
            debug!(%start, %end, minutes, granularity, "dropping gap below granularity");
            return;
        }
        let interval = FreeInterval::new(start, end, table, buffer_before, buffer_after);
        debug!(%start, %end, minutes, energy = %interval.energy_level, "free interval");
        intervals.push(interval);
    }
}

/// Derive free intervals with the canonical policy for a single-day view
/// where every obligation applies.
pub fn derive_free_intervals(
    obligations: &[Obligation],
    day_start_hour: u32,
    day_end_hour: u32,
) -> Result<Vec<FreeInterval>, ValidationError> {
    let window = DayWindow::from_hours(day_start_hour, day_end_hour)?;
    AvailabilityDeriver::default().derive_in(obligations, None, window)
}
