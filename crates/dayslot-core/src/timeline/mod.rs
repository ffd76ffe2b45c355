//! Free-time detection.
//!
//! Walks a day's fixed obligations and emits the free intervals left
//! around them, each tagged with the energy expected at that time of day.

mod gap;

pub use gap::{derive_free_intervals, AvailabilityDeriver, FreeInterval};
