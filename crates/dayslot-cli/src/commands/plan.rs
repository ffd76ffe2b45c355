use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use super::{print_json, CmdResult, DayArgs, PlanFileArg};
use dayslot_core::{Config, FreeInterval, ScheduleStore, ScheduledSlot, UnplacedSubtask, Weekday};

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub plan: PlanFileArg,
    #[command(flatten)]
    pub day: DayArgs,
    /// Order slots by start time instead of assignment order
    #[arg(long)]
    pub chronological: bool,
}

#[derive(Serialize)]
struct PlanReport<'a> {
    date: NaiveDate,
    day: Weekday,
    slots: Vec<ScheduledSlot>,
    unplaced: &'a [UnplacedSubtask],
    remaining: &'a [FreeInterval],
}

pub fn run(args: PlanArgs, json: bool) -> CmdResult {
    let config = Config::load()?;
    let mut store = args.plan.open(&config)?;
    let (day, date) = args.day.resolve();

    let outcome = store.generate_schedule(Some(day), date)?.clone();
    let slots = if args.chronological {
        outcome.chronological()
    } else {
        outcome.placed.clone()
    };

    if json {
        return print_json(&PlanReport {
            date,
            day,
            slots,
            unplaced: &outcome.unplaced,
            remaining: &outcome.remaining,
        });
    }

    println!("Schedule for {date} ({day}):");
    for slot in &slots {
        let (task, subtask) = titles(&store, &slot.task_id, &slot.subtask_id);
        println!(
            "  {}-{}  {} / {}  [{}, {}]",
            slot.start_time, slot.end_time, task, subtask, slot.energy_level, slot.location
        );
    }
    if !outcome.unplaced.is_empty() {
        println!("Did not fit:");
        for missing in &outcome.unplaced {
            let (task, subtask) = titles(&store, &missing.task_id, &missing.subtask_id);
            println!("  {task} / {subtask}  (needs {} min)", missing.required_minutes);
        }
    }
    println!(
        "{} subtasks scheduled ({} min), {} left over",
        outcome.placed.len(),
        outcome.scheduled_minutes(),
        outcome.unplaced.len()
    );
    Ok(())
}

fn titles<'a>(store: &'a ScheduleStore, task_id: &'a str, subtask_id: &'a str) -> (&'a str, &'a str) {
    let Some(task) = store.task(task_id) else {
        return (task_id, subtask_id);
    };
    let subtask = task
        .subtask(subtask_id)
        .map_or(subtask_id, |s| s.title.as_str());
    (task.title.as_str(), subtask)
}
