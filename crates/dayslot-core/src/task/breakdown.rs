//! Keyword rules that turn a free-form title into a broken-down task.
//!
//! Rules are data: an ordered list of `keyword -> template id` pairs that can
//! be replaced from the config file. The first keyword found in the title
//! (case-insensitive) picks the template; no match falls back to a generic
//! three-step breakdown.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::templates::{SubtaskSpec, TemplateRegistry};
use super::{EnergyLevel, Task, TaskComplexity, TaskLocation};
use crate::error::ConfigError;

/// One keyword rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownRule {
    pub keyword: String,
    pub template: String,
}

impl BreakdownRule {
    pub fn new(keyword: impl Into<String>, template: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            template: template.into(),
        }
    }

    fn matches(&self, title_lower: &str) -> bool {
        title_lower.contains(&self.keyword.to_lowercase())
    }
}

/// Ordered rule table plus the fallback breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownRules {
    #[serde(default = "default_rules")]
    pub rules: Vec<BreakdownRule>,
    #[serde(default = "default_generic")]
    pub generic: Vec<SubtaskSpec>,
}

fn default_rules() -> Vec<BreakdownRule> {
    [
        ("clean kitchen", "clean-kitchen"),
        ("clean bathroom", "clean-bathroom"),
        ("clean bedroom", "clean-bedroom"),
        ("clean living room", "clean-living-room"),
        ("clean car", "clean-car"),
        ("wash car", "clean-car"),
        ("clean garage", "clean-garage"),
        ("clean storage", "clean-storage"),
        ("meal prep", "meal-prep"),
        ("exercise", "workout"),
        ("workout", "workout"),
        ("study", "study-session"),
        ("learn", "study-session"),
        ("assignment", "school-assignment"),
        ("homework", "school-assignment"),
        ("read", "daily-reading"),
    ]
    .into_iter()
    .map(|(keyword, template)| BreakdownRule::new(keyword, template))
    .collect()
}

fn default_generic() -> Vec<SubtaskSpec> {
    use EnergyLevel::Medium;
    let at = TaskLocation::Any;
    vec![
        SubtaskSpec::new("Plan and prepare", 10, Medium, at),
        SubtaskSpec::new("Start main work", 20, Medium, at),
        SubtaskSpec::new("Complete and review", 10, Medium, at),
    ]
}

impl Default for BreakdownRules {
    fn default() -> Self {
        Self {
            rules: default_rules(),
            generic: default_generic(),
        }
    }
}

impl BreakdownRules {
    /// Template id chosen for `title`, if any rule matches.
    pub fn match_template(&self, title: &str) -> Option<&str> {
        let lower = title.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lower))
            .map(|rule| rule.template.as_str())
    }

    /// Build a task for `title`.
    ///
    /// A rule whose template is missing from `registry` is treated as no match.
    pub fn breakdown(&self, title: &str, description: &str, registry: &TemplateRegistry) -> Task {
        if let Some(template) = self.match_template(title).and_then(|id| registry.get(id)) {
            debug!(title, template = %template.id, "breakdown matched template");
            return template.instantiate_titled(title).with_description(description);
        }

        debug!(title, "breakdown fell back to generic steps");
        Task::new(title)
            .with_description(description)
            .with_energy(EnergyLevel::Medium)
            .with_location(TaskLocation::Any)
            .with_complexity(TaskComplexity::Moderate)
            .with_subtasks(self.generic.iter().map(SubtaskSpec::build).collect())
    }

    /// Every rule must name a known template and a non-empty keyword.
    pub fn validate(&self, registry: &TemplateRegistry) -> Result<(), ConfigError> {
        for rule in &self.rules {
            if rule.keyword.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "breakdown.rules.keyword".to_string(),
                    message: format!("empty keyword for template '{}'", rule.template),
                });
            }
            if registry.get(&rule.template).is_none() {
                return Err(ConfigError::InvalidValue {
                    key: "breakdown.rules.template".to_string(),
                    message: format!("unknown template '{}' for keyword '{}'", rule.template, rule.keyword),
                });
            }
        }
        if self.generic.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "breakdown.generic".to_string(),
                message: "generic breakdown needs at least one step".to_string(),
            });
        }
        Ok(())
    }
}
