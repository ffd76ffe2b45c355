//! Reusable task blueprints.
//!
//! A template is read-only data: a name, the energy/location/complexity of
//! the whole job, and the subtasks it breaks into. Instantiating one yields a
//! fresh [`Task`] with new ids and nothing completed.

use serde::{Deserialize, Serialize};

use super::{EnergyLevel, Subtask, Task, TaskComplexity, TaskLocation};

/// Subtask definition inside a template (no id, no completion state).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtaskSpec {
    pub title: String,
    pub estimated_minutes: u32,
    pub energy_level: EnergyLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<TaskLocation>,
}

impl SubtaskSpec {
    pub fn new(
        title: impl Into<String>,
        estimated_minutes: u32,
        energy_level: EnergyLevel,
        location: TaskLocation,
    ) -> Self {
        Self {
            title: title.into(),
            estimated_minutes,
            energy_level,
            location: Some(location),
        }
    }

    /// Materialize as an incomplete subtask with a fresh id.
    pub fn build(&self) -> Subtask {
        let subtask = Subtask::new(self.title.clone(), self.estimated_minutes, self.energy_level);
        match self.location {
            Some(location) => subtask.with_location(location),
            None => subtask,
        }
    }
}

/// Blueprint for a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub subtasks: Vec<SubtaskSpec>,
    pub energy_level: EnergyLevel,
    pub location: TaskLocation,
    pub complexity: TaskComplexity,
}

impl TaskTemplate {
    /// Sum of the subtask estimates.
    pub fn total_minutes(&self) -> u32 {
        self.subtasks.iter().map(|s| s.estimated_minutes).sum()
    }

    /// New task named after the template.
    pub fn instantiate(&self) -> Task {
        self.instantiate_titled(self.name.clone())
    }

    /// New task with a caller-chosen title.
    pub fn instantiate_titled(&self, title: impl Into<String>) -> Task {
        let mut task = Task::new(title)
            .with_description(self.description.clone())
            .with_energy(self.energy_level)
            .with_location(self.location)
            .with_complexity(self.complexity)
            .with_subtasks(self.subtasks.iter().map(SubtaskSpec::build).collect());
        task.template_id = Some(self.id.clone());
        task
    }

    /// Create kitchen cleaning template
    pub fn clean_kitchen() -> Self {
        use EnergyLevel::*;
        let at = TaskLocation::Kitchen;
        Self {
            id: "clean-kitchen".to_string(),
            name: "Clean Kitchen".to_string(),
            description: "Complete kitchen cleaning routine".to_string(),
            energy_level: Medium,
            location: at,
            complexity: TaskComplexity::Moderate,
            subtasks: vec![
                SubtaskSpec::new("Clear and wipe all counters", 10, Low, at),
                SubtaskSpec::new("Load/run dishwasher or wash dishes", 15, Medium, at),
                SubtaskSpec::new("Clean stovetop and microwave", 10, Medium, at),
                SubtaskSpec::new("Sweep and mop floor", 15, Medium, at),
                SubtaskSpec::new("Organize pantry and cabinets", 20, High, at),
                SubtaskSpec::new("Clean sink and faucet", 5, Low, at),
            ],
        }
    }

    /// Create bathroom cleaning template
    pub fn clean_bathroom() -> Self {
        use EnergyLevel::*;
        let at = TaskLocation::Bathroom;
        Self {
            id: "clean-bathroom".to_string(),
            name: "Clean Bathroom".to_string(),
            description: "Thorough bathroom cleaning".to_string(),
            energy_level: Medium,
            location: at,
            complexity: TaskComplexity::Moderate,
            subtasks: vec![
                SubtaskSpec::new("Clean toilet (inside and outside)", 10, Medium, at),
                SubtaskSpec::new("Scrub shower/tub and tiles", 20, High, at),
                SubtaskSpec::new("Clean mirror and light fixtures", 5, Low, at),
                SubtaskSpec::new("Sweep and mop floor", 10, Medium, at),
                SubtaskSpec::new("Organize medicine cabinet and supplies", 10, Medium, at),
                SubtaskSpec::new("Replace towels and restock supplies", 5, Low, at),
            ],
        }
    }

    /// Create bedroom cleaning template
    pub fn clean_bedroom() -> Self {
        use EnergyLevel::*;
        let at = TaskLocation::Bedroom;
        Self {
            id: "clean-bedroom".to_string(),
            name: "Clean Bedroom".to_string(),
            description: "Organize and clean bedroom space".to_string(),
            energy_level: Medium,
            location: at,
            complexity: TaskComplexity::Simple,
            subtasks: vec![
                SubtaskSpec::new("Make bed and organize pillows", 5, Low, at),
                SubtaskSpec::new("Put away clothes and organize closet", 20, Medium, at),
                SubtaskSpec::new("Dust surfaces (dresser, nightstands)", 10, Low, at),
                SubtaskSpec::new("Vacuum or sweep floor", 10, Medium, at),
                SubtaskSpec::new("Organize personal items", 15, Medium, at),
            ],
        }
    }

    /// Create living room cleaning template
    pub fn clean_living_room() -> Self {
        use EnergyLevel::*;
        let at = TaskLocation::LivingRoom;
        Self {
            id: "clean-living-room".to_string(),
            name: "Clean Living Room".to_string(),
            description: "Tidy and clean main living space".to_string(),
            energy_level: Medium,
            location: at,
            complexity: TaskComplexity::Simple,
            subtasks: vec![
                SubtaskSpec::new("Pick up and organize items", 15, Low, at),
                SubtaskSpec::new("Dust furniture and electronics", 15, Low, at),
                SubtaskSpec::new("Vacuum or sweep floor", 15, Medium, at),
                SubtaskSpec::new("Fluff cushions and fold blankets", 5, Low, at),
                SubtaskSpec::new("Organize entertainment center", 10, Medium, at),
            ],
        }
    }

    /// Create car cleaning template
    pub fn clean_car() -> Self {
        use EnergyLevel::*;
        let at = TaskLocation::Car;
        Self {
            id: "clean-car".to_string(),
            name: "Clean Car".to_string(),
            description: "Interior and exterior car cleaning".to_string(),
            energy_level: High,
            location: at,
            complexity: TaskComplexity::Moderate,
            subtasks: vec![
                SubtaskSpec::new("Remove trash and personal items", 10, Low, at),
                SubtaskSpec::new("Vacuum interior (seats, floor, trunk)", 20, Medium, at),
                SubtaskSpec::new("Wipe dashboard and console", 10, Low, at),
                SubtaskSpec::new("Clean windows (inside and outside)", 15, Medium, at),
                SubtaskSpec::new("Wash exterior and wheels", 30, High, at),
                SubtaskSpec::new("Organize trunk and glove compartment", 10, Medium, at),
            ],
        }
    }

    /// Create garage cleaning template
    pub fn clean_garage() -> Self {
        use EnergyLevel::*;
        let at = TaskLocation::Garage;
        Self {
            id: "clean-garage".to_string(),
            name: "Clean Garage".to_string(),
            description: "Organize and clean garage space".to_string(),
            energy_level: High,
            location: at,
            complexity: TaskComplexity::Complex,
            subtasks: vec![
                SubtaskSpec::new("Sort and categorize items", 45, High, at),
                SubtaskSpec::new("Organize tools and equipment", 30, Medium, at),
                SubtaskSpec::new("Sweep floor and remove debris", 20, Medium, at),
                SubtaskSpec::new("Install or reorganize storage systems", 60, High, at),
                SubtaskSpec::new("Dispose of unwanted items", 20, Medium, at),
            ],
        }
    }

    /// Create storage cleaning template
    pub fn clean_storage() -> Self {
        use EnergyLevel::*;
        let at = TaskLocation::Storage;
        Self {
            id: "clean-storage".to_string(),
            name: "Clean Storage".to_string(),
            description: "Organize storage areas and closets".to_string(),
            energy_level: High,
            location: at,
            complexity: TaskComplexity::Complex,
            subtasks: vec![
                SubtaskSpec::new("Remove everything and assess", 30, Medium, at),
                SubtaskSpec::new("Sort items into keep/donate/discard", 60, High, at),
                SubtaskSpec::new("Clean shelves and storage area", 20, Medium, at),
                SubtaskSpec::new("Organize remaining items with labels", 45, High, at),
                SubtaskSpec::new("Create inventory list", 15, Low, at),
            ],
        }
    }

    /// Create weekly meal prep template
    pub fn meal_prep() -> Self {
        use EnergyLevel::*;
        use TaskLocation::{Any, Kitchen, Office};
        Self {
            id: "meal-prep".to_string(),
            name: "Weekly Meal Prep".to_string(),
            description: "Plan and prepare meals for the week".to_string(),
            energy_level: High,
            location: Kitchen,
            complexity: TaskComplexity::Complex,
            subtasks: vec![
                SubtaskSpec::new("Plan weekly menu and create shopping list", 30, Medium, Office),
                SubtaskSpec::new("Shop for groceries and ingredients", 60, Medium, Any),
                SubtaskSpec::new("Prep vegetables and ingredients", 45, Medium, Kitchen),
                SubtaskSpec::new("Cook base proteins and grains", 90, High, Kitchen),
                SubtaskSpec::new("Portion and store meals", 30, Medium, Kitchen),
                SubtaskSpec::new("Label containers with dates", 10, Low, Kitchen),
            ],
        }
    }

    /// Create daily reading template
    pub fn daily_reading() -> Self {
        use EnergyLevel::*;
        let at = TaskLocation::Any;
        Self {
            id: "daily-reading".to_string(),
            name: "Daily Reading".to_string(),
            description: "Read one chapter from current book".to_string(),
            energy_level: Low,
            location: at,
            complexity: TaskComplexity::Simple,
            subtasks: vec![
                SubtaskSpec::new("Find comfortable reading spot", 2, Low, at),
                SubtaskSpec::new("Read one chapter (20-30 pages)", 25, Low, at),
                SubtaskSpec::new("Take notes or highlight key points", 8, Low, at),
                SubtaskSpec::new("Update reading log/progress", 5, Low, at),
            ],
        }
    }

    /// Create school assignment template
    pub fn school_assignment() -> Self {
        use EnergyLevel::*;
        let at = TaskLocation::Office;
        Self {
            id: "school-assignment".to_string(),
            name: "School Assignment".to_string(),
            description: "Complete online college coursework".to_string(),
            energy_level: High,
            location: at,
            complexity: TaskComplexity::Complex,
            subtasks: vec![
                SubtaskSpec::new("Review assignment requirements", 15, Medium, at),
                SubtaskSpec::new("Research and gather resources", 45, High, at),
                SubtaskSpec::new("Create outline or plan", 20, Medium, at),
                SubtaskSpec::new("Write/complete main assignment", 90, High, at),
                SubtaskSpec::new("Review and edit work", 30, Medium, at),
                SubtaskSpec::new("Submit assignment", 10, Low, at),
            ],
        }
    }

    /// Create workout template
    pub fn workout() -> Self {
        use EnergyLevel::*;
        let at = TaskLocation::Any;
        Self {
            id: "workout".to_string(),
            name: "Workout".to_string(),
            description: "Warm up, train, and cool down".to_string(),
            energy_level: High,
            location: at,
            complexity: TaskComplexity::Simple,
            subtasks: vec![
                SubtaskSpec::new("Change into workout clothes", 5, Low, at),
                SubtaskSpec::new("5-minute warm-up", 5, Medium, at),
                SubtaskSpec::new("Main workout routine", 25, High, at),
                SubtaskSpec::new("Cool down and stretch", 10, Low, at),
            ],
        }
    }

    /// Create study session template
    pub fn study_session() -> Self {
        use EnergyLevel::*;
        let at = TaskLocation::Office;
        Self {
            id: "study-session".to_string(),
            name: "Study Session".to_string(),
            description: "Review, read, take notes, and practice".to_string(),
            energy_level: High,
            location: at,
            complexity: TaskComplexity::Moderate,
            subtasks: vec![
                SubtaskSpec::new("Review previous material", 10, Medium, at),
                SubtaskSpec::new("Read new chapter/material", 20, High, at),
                SubtaskSpec::new("Take notes on key points", 15, Medium, at),
                SubtaskSpec::new("Practice problems/review", 15, High, at),
            ],
        }
    }
}

/// Catalog of available templates
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: Vec<TaskTemplate>,
}

impl TemplateRegistry {
    /// Create a new registry with the built-in templates
    pub fn new() -> Self {
        Self {
            templates: vec![
                TaskTemplate::clean_kitchen(),
                TaskTemplate::clean_bathroom(),
                TaskTemplate::clean_bedroom(),
                TaskTemplate::clean_living_room(),
                TaskTemplate::clean_car(),
                TaskTemplate::clean_garage(),
                TaskTemplate::clean_storage(),
                TaskTemplate::meal_prep(),
                TaskTemplate::daily_reading(),
                TaskTemplate::school_assignment(),
                TaskTemplate::workout(),
                TaskTemplate::study_session(),
            ],
        }
    }

    pub fn all(&self) -> &[TaskTemplate] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&TaskTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn by_location(&self, location: TaskLocation) -> Vec<&TaskTemplate> {
        self.templates.iter().filter(|t| t.location == location).collect()
    }

    pub fn by_energy(&self, energy: EnergyLevel) -> Vec<&TaskTemplate> {
        self.templates.iter().filter(|t| t.energy_level == energy).collect()
    }

    /// Add a custom template, replacing any template with the same id
    pub fn add_template(&mut self, template: TaskTemplate) {
        match self.templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_ids_are_unique() {
        let registry = TemplateRegistry::new();
        let ids: HashSet<_> = registry.all().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), registry.all().len());
        assert_eq!(registry.all().len(), 12);
    }

    #[test]
    fn kitchen_template_structure() {
        let template = TaskTemplate::clean_kitchen();
        assert_eq!(template.subtasks.len(), 6);
        assert_eq!(template.total_minutes(), 75);
        assert_eq!(template.subtasks[4].energy_level, EnergyLevel::High);
    }

    #[test]
    fn instantiate_creates_fresh_incomplete_task() {
        let template = TaskTemplate::clean_garage();
        let a = template.instantiate();
        let b = template.instantiate();

        assert_ne!(a.id, b.id);
        assert_eq!(a.title, "Clean Garage");
        assert_eq!(a.template_id.as_deref(), Some("clean-garage"));
        assert_eq!(a.priority(), 6);
        assert_eq!(a.total_estimated_minutes(), template.total_minutes());
        assert!(a.subtasks.iter().all(|s| !s.completed));
        assert!(a.validate().is_ok());
        assert_ne!(a.subtasks[0].id, b.subtasks[0].id);
    }

    #[test]
    fn meal_prep_keeps_per_subtask_locations() {
        let task = TaskTemplate::meal_prep().instantiate();
        assert_eq!(task.location, TaskLocation::Kitchen);
        assert_eq!(task.subtasks[0].location, Some(TaskLocation::Office));
        assert_eq!(task.subtasks[1].location, Some(TaskLocation::Any));
    }

    #[test]
    fn lookups_by_location_and_energy() {
        let registry = TemplateRegistry::new();
        let kitchen: Vec<_> = registry
            .by_location(TaskLocation::Kitchen)
            .iter()
            .map(|t| t.id.clone())
            .collect();
        assert_eq!(kitchen, vec!["clean-kitchen", "meal-prep"]);

        let low: Vec<_> = registry.by_energy(EnergyLevel::Low).iter().map(|t| t.id.clone()).collect();
        assert_eq!(low, vec!["daily-reading"]);
        assert!(registry.get("clean-car").is_some());
        assert!(registry.get("clean-attic").is_none());
    }

    #[test]
    fn add_template_replaces_same_id() {
        let mut registry = TemplateRegistry::new();
        let mut custom = TaskTemplate::daily_reading();
        custom.name = "Evening Reading".to_string();
        registry.add_template(custom);
        assert_eq!(registry.all().len(), 12);
        assert_eq!(registry.get("daily-reading").unwrap().name, "Evening Reading");
    }
}
