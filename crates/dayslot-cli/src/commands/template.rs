//! Template catalog commands for CLI.

use clap::Subcommand;

use super::{print_json, CmdResult};
use dayslot_core::{Config, EnergyLevel, TaskLocation, TaskTemplate, ValidationError};

#[derive(Subcommand)]
pub enum TemplateAction {
    /// List templates
    List {
        /// Only templates for this location
        #[arg(long)]
        location: Option<TaskLocation>,
        /// Only templates needing this energy level
        #[arg(long)]
        energy: Option<EnergyLevel>,
    },
    /// Show one template with its subtasks
    Show {
        /// Template id (e.g. "clean-kitchen")
        id: String,
    },
}

pub fn run(action: TemplateAction, json: bool) -> CmdResult {
    let registry = Config::load()?.registry();

    match action {
        TemplateAction::List { location, energy } => {
            let mut templates: Vec<&TaskTemplate> = match location {
                Some(location) => registry.by_location(location),
                None => registry.all().iter().collect(),
            };
            if let Some(energy) = energy {
                let matching = registry.by_energy(energy);
                templates.retain(|t| matching.iter().any(|m| m.id == t.id));
            }
            if json {
                return print_json(&templates);
            }
            for template in templates {
                println!(
                    "{:<20} {:<22} {:>4} min  {:<6}  {}",
                    template.id,
                    template.name,
                    template.total_minutes(),
                    template.energy_level,
                    template.location
                );
            }
        }
        TemplateAction::Show { id } => {
            let template = registry
                .get(&id)
                .ok_or_else(|| ValidationError::UnknownTemplate(id.clone()))?;
            if json {
                return print_json(template);
            }
            println!("{} ({})", template.name, template.id);
            println!("{}", template.description);
            println!(
                "energy {}, location {}, {} min total",
                template.energy_level,
                template.location,
                template.total_minutes()
            );
            for (i, step) in template.subtasks.iter().enumerate() {
                println!(
                    "  {}. {} ({} min, {})",
                    i + 1,
                    step.title,
                    step.estimated_minutes,
                    step.energy_level
                );
            }
        }
    }
    Ok(())
}
