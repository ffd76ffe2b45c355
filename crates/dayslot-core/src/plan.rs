//! Plan files: the obligations and tasks of a day, on disk.
//!
//! The format follows the file extension: `.json` is JSON, anything else is
//! TOML.
//!
//! ```toml
//! [[obligations]]
//! id = "work"
//! title = "Work"
//! start_time = "09:00"
//! end_time = "17:00"
//! category = "work"
//!
//! [[tasks]]
//! id = "garage"
//! title = "Clean garage"
//! energy_level = "high"
//! location = "garage"
//! complexity = "complex"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CoreError, Result};
use crate::schedule::Obligation;
use crate::task::Task;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanFormat {
    Toml,
    Json,
}

impl PlanFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => PlanFormat::Json,
            _ => PlanFormat::Toml,
        }
    }
}

/// Obligations plus tasks, as stored in a plan file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanFile {
    #[serde(default)]
    pub obligations: Vec<Obligation>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl PlanFile {
    pub fn parse(content: &str, format: PlanFormat) -> Result<Self> {
        let plan = match format {
            PlanFormat::Json => serde_json::from_str(content)?,
            PlanFormat::Toml => toml::from_str(content)?,
        };
        Ok(plan)
    }

    pub fn render(&self, format: PlanFormat) -> Result<String> {
        let content = match format {
            PlanFormat::Json => serde_json::to_string_pretty(self)?,
            PlanFormat::Toml => toml::to_string_pretty(self)?,
        };
        Ok(content)
    }

    /// Read a plan file.
    ///
    /// # Errors
    /// Returns an error naming the path if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CoreError::Custom(format!("cannot read {}: {e}", path.display())))?;
        Self::parse(&content, PlanFormat::from_path(path))
            .map_err(|e| CoreError::Custom(format!("cannot parse {}: {e}", path.display())))
    }

    /// Write the plan back in the format its extension implies.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.render(PlanFormat::from_path(path))?)?;
        Ok(())
    }
}
