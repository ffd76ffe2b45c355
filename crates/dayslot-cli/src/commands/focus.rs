use clap::Args;

use super::{print_json, CmdResult, PlanFileArg};
use dayslot_core::{focus_queue, Config};

#[derive(Args)]
pub struct FocusArgs {
    #[command(flatten)]
    pub plan: PlanFileArg,
    /// Number of subtasks to show (default from config)
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Args)]
pub struct DoneArgs {
    #[command(flatten)]
    pub plan: PlanFileArg,
    pub task_id: String,
    pub subtask_id: String,
    /// Minutes actually spent
    #[arg(long)]
    pub minutes: Option<u32>,
    /// Mark the subtask incomplete again
    #[arg(long, conflicts_with = "minutes")]
    pub reopen: bool,
}

pub fn run(args: FocusArgs, json: bool) -> CmdResult {
    let config = Config::load()?;
    let store = args.plan.open(&config)?;
    let limit = args.limit.unwrap_or(config.focus.queue_length);
    let queue = focus_queue(store.tasks(), limit);

    if json {
        return print_json(&queue);
    }
    let Some((current, next)) = queue.split_first() else {
        println!("All subtasks are complete.");
        return Ok(());
    };
    println!(
        "Now: {} ({} min, {}) from \"{}\" at {}",
        current.title,
        current.estimated_minutes,
        current.energy_level,
        current.task_title,
        current.task_location
    );
    for item in next {
        println!("Next: {} ({} min) from \"{}\"", item.title, item.estimated_minutes, item.task_title);
    }
    Ok(())
}

pub fn done(args: DoneArgs, json: bool) -> CmdResult {
    let config = Config::load()?;
    let mut store = args.plan.open(&config)?;
    store.update_subtask(&args.task_id, &args.subtask_id, !args.reopen, args.minutes)?;
    store.to_plan().save(&args.plan.path)?;

    let task = store.task(&args.task_id);
    if json {
        return print_json(&task);
    }
    if let Some(task) = task {
        println!(
            "{}: {}/{} subtasks done",
            task.title,
            task.completed_count(),
            task.subtasks.len()
        );
    }
    Ok(())
}
