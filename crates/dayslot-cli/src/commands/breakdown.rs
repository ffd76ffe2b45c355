use clap::Args;
use std::path::PathBuf;

use super::{print_json, CmdResult};
use dayslot_core::{Config, PlanFile};

#[derive(Args)]
pub struct BreakdownArgs {
    /// Task title, e.g. "Clean kitchen"
    pub title: String,
    /// Optional task description
    #[arg(long, default_value = "")]
    pub description: String,
    /// Append the resulting task to this plan file
    #[arg(long, value_name = "FILE")]
    pub add_to: Option<PathBuf>,
}

pub fn run(args: BreakdownArgs, json: bool) -> CmdResult {
    let config = Config::load()?;
    let task = config
        .breakdown
        .breakdown(&args.title, &args.description, &config.registry());

    if let Some(path) = &args.add_to {
        let mut plan = if path.exists() {
            PlanFile::load(path)?
        } else {
            PlanFile::default()
        };
        plan.tasks.push(task.clone());
        plan.save(path)?;
    }

    if json {
        return print_json(&task);
    }

    let source = task.template_id.as_deref().unwrap_or("generic");
    println!("{} [{}] ({} min)", task.title, source, task.total_estimated_minutes());
    for subtask in &task.subtasks {
        println!(
            "  - {} ({} min, {})",
            subtask.title, subtask.estimated_minutes, subtask.energy_level
        );
    }
    if let Some(path) = &args.add_to {
        println!("Added task {} to {}", task.id, path.display());
    }
    Ok(())
}
