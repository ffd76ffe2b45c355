use clap::Args;

use super::{print_json, CmdResult, PlanFileArg};
use dayslot_core::{Config, WeeklyStats};

#[derive(Args)]
pub struct ReviewArgs {
    #[command(flatten)]
    pub plan: PlanFileArg,
}

pub fn run(args: ReviewArgs, json: bool) -> CmdResult {
    let config = Config::load()?;
    let store = args.plan.open(&config)?;
    let stats = WeeklyStats::from_tasks(store.tasks());

    if json {
        return print_json(&stats);
    }

    println!("Tasks with progress:  {}", stats.tasks_completed);
    println!("Subtasks done:        {}", stats.subtasks_completed);
    println!("Subtasks open:        {}", stats.subtasks_skipped);
    println!(
        "Time spent:           {} min (estimated {} min)",
        stats.total_time_spent, stats.total_estimated_time
    );
    println!("Average per subtask:  {:.1} min", stats.average_task_time);
    println!("Longest streak:       {} days", stats.streak_days);
    if let Some(accuracy) = stats.estimate_accuracy() {
        println!("Estimate accuracy:    {:.0}%", accuracy * 100.0);
    }
    for (level, count) in &stats.energy_distribution {
        println!("  {level:<6} energy: {count} done");
    }
    for (location, efficiency) in &stats.location_efficiency {
        println!("  {location:<12} {efficiency:.0}%");
    }
    if let Some(level) = stats.dominant_energy() {
        println!("Most work got done on {level} energy.");
    }
    if let Some(location) = stats.best_location() {
        println!("Most productive location: {location}.");
    }
    Ok(())
}
