use clap::Args;

use super::{print_json, CmdResult, DayArgs, PlanFileArg};
use dayslot_core::Config;

#[derive(Args)]
pub struct SlotsArgs {
    #[command(flatten)]
    pub plan: PlanFileArg,
    #[command(flatten)]
    pub day: DayArgs,
}

pub fn run(args: SlotsArgs, json: bool) -> CmdResult {
    let config = Config::load()?;
    let store = args.plan.open(&config)?;
    let (day, _) = args.day.resolve();
    let intervals = store.available_intervals(Some(day))?;

    if json {
        return print_json(&intervals);
    }

    if intervals.is_empty() {
        println!("No free time on {day}.");
        return Ok(());
    }
    println!("Free time on {day}:");
    for interval in &intervals {
        println!(
            "  {}-{}  {:>4} min  {:<6}  buffer {}/{}",
            interval.start,
            interval.end,
            interval.duration_minutes,
            interval.energy_level,
            interval.buffer_before,
            interval.buffer_after,
        );
    }
    Ok(())
}
