pub mod breakdown;
pub mod config;
pub mod focus;
pub mod plan;
pub mod review;
pub mod slots;
pub mod template;

use chrono::{Datelike, Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;
use tracing::debug;

use dayslot_core::{Config, PlanFile, ScheduleStore, Weekday};

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Plan file argument shared by the data commands.
#[derive(Args)]
pub struct PlanFileArg {
    /// Plan file with obligations and tasks (.toml or .json)
    #[arg(long = "plan", short = 'p', value_name = "FILE")]
    pub path: PathBuf,
}

impl PlanFileArg {
    /// Load the plan into a store configured from the user's config.
    pub fn open(&self, config: &Config) -> Result<ScheduleStore, Box<dyn std::error::Error>> {
        let plan = PlanFile::load(&self.path)?;
        debug!(
            path = %self.path.display(),
            obligations = plan.obligations.len(),
            tasks = plan.tasks.len(),
            "loaded plan"
        );
        Ok(ScheduleStore::from_plan(config.scheduling.clone(), plan)?)
    }
}

/// Day selection shared by `slots` and `plan`.
#[derive(Args)]
pub struct DayArgs {
    /// Weekday whose obligations apply (default: weekday of --date)
    #[arg(long)]
    pub day: Option<Weekday>,
    /// Calendar date, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

impl DayArgs {
    pub fn resolve(&self) -> (Weekday, NaiveDate) {
        let date = self.date.unwrap_or_else(|| Local::now().date_naive());
        let day = self.day.unwrap_or_else(|| Weekday::from(date.weekday()));
        (day, date)
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
