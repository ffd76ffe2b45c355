//! Statistics for dayslot
//!
//! Aggregates over the task list: completion counts, time spent against
//! estimates, and which energy tiers and locations get work done.

mod weekly;

pub use weekly::WeeklyStats;
