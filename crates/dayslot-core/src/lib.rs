//! # Dayslot Core Library
//!
//! This library provides the core logic for the dayslot daily planner. It
//! implements a CLI-first philosophy where every operation is available via
//! the standalone `dayslot` binary, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Availability**: Turns fixed obligations plus buffers into free,
//!   energy-tagged intervals inside a day window
//! - **Placement**: Greedily assigns incomplete subtasks to the best-scoring
//!   interval, shrinking the pool as it goes
//! - **Tasks**: Tasks, subtasks, a template catalog, and keyword breakdown
//! - **Storage**: TOML-based configuration and TOML/JSON plan files
//!
//! ## Key Components
//!
//! - [`AvailabilityDeriver`]: Obligations to free intervals
//! - [`PlacementEngine`]: Subtasks to scheduled slots
//! - [`ScheduleStore`]: In-memory session state
//! - [`Config`]: Application configuration management

pub mod clock;
pub mod energy;
pub mod error;
pub mod focus;
pub mod plan;
pub mod schedule;
pub mod scheduler;
pub mod stats;
pub mod storage;
pub mod store;
pub mod task;
pub mod timeline;

pub use clock::ClockTime;
pub use energy::{EnergyLevel, EnergyTable};
pub use error::{ConfigError, CoreError, ValidationError};
pub use focus::{focus_queue, FocusItem, FocusSession};
pub use plan::{PlanFile, PlanFormat};
pub use schedule::{
    BufferPolicy, DayWindow, Obligation, ObligationKind, ScheduledSlot, SchedulingPolicy, Weekday,
};
pub use scheduler::{place_subtasks, PlacementEngine, PlacementOutcome, UnplacedSubtask};
pub use stats::WeeklyStats;
pub use storage::Config;
pub use store::ScheduleStore;
pub use task::breakdown::{BreakdownRule, BreakdownRules};
pub use task::templates::{SubtaskSpec, TaskTemplate, TemplateRegistry};
pub use task::{Subtask, Task, TaskComplexity, TaskLocation};
pub use timeline::{derive_free_intervals, AvailabilityDeriver, FreeInterval};
