//! TOML-based application configuration.
//!
//! Stores:
//! - Scheduling policy (buffers, energy table, day window)
//! - Breakdown keyword rules
//! - Custom task templates
//! - Focus mode preferences
//!
//! Configuration is stored at `~/.config/dayslot/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::focus::DEFAULT_QUEUE_LENGTH;
use crate::schedule::SchedulingPolicy;
use crate::task::breakdown::BreakdownRules;
use crate::task::templates::{TaskTemplate, TemplateRegistry};

/// Focus mode configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusConfig {
    #[serde(default = "default_queue_length")]
    pub queue_length: usize,
}

fn default_queue_length() -> usize {
    DEFAULT_QUEUE_LENGTH
}

impl Default for FocusConfig {
    fn default() -> Self {
        Self {
            queue_length: default_queue_length(),
        }
    }
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/dayslot/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scheduling: SchedulingPolicy,
    #[serde(default)]
    pub breakdown: BreakdownRules,
    #[serde(default)]
    pub focus: FocusConfig,
    /// User templates; an id matching a built-in replaces it.
    #[serde(default)]
    pub templates: Vec<TaskTemplate>,
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::InvalidValue {
            key: key.to_string(),
            message: "unknown config key".to_string(),
        };
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(invalid("config key is empty".to_string()));
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<u64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Location of the config file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created.
    pub fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk, writing the defaults on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed or
    /// fails validation, or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if !path.exists() {
            let cfg = Self::default();
            cfg.save_to(&path)?;
            return Ok(cfg);
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into())
            }
        };

        let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key. The change is applied in memory only;
    /// call [`Config::save`] to persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting config is invalid. `self` is left untouched then.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Built-in templates plus the user's own.
    pub fn registry(&self) -> TemplateRegistry {
        let mut registry = TemplateRegistry::new();
        for template in &self.templates {
            registry.add_template(template.clone());
        }
        registry
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns the first invalid value found.
    pub fn validate(&self) -> Result<()> {
        self.scheduling.validate()?;
        self.breakdown.validate(&self.registry())?;
        if self.focus.queue_length == 0 {
            return Err(ConfigError::InvalidValue {
                key: "focus.queue_length".to_string(),
                message: "must be at least 1".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::energy::EnergyTable;
    use crate::schedule::BufferPolicy;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, cfg);
        assert_eq!(parsed.scheduling.day_start_hour, 6);
        assert_eq!(parsed.focus.queue_length, 3);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [scheduling]
            buffer_policy = "flat"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.scheduling.buffer_policy, BufferPolicy::Flat);
        assert_eq!(cfg.scheduling.energy_table, EnergyTable::Extended);
        assert_eq!(cfg.breakdown, BreakdownRules::default());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("scheduling.day_end_hour").as_deref(), Some("23"));
        assert_eq!(cfg.get("scheduling.buffer_policy").as_deref(), Some("by_category"));
        assert_eq!(cfg.get("focus.queue_length").as_deref(), Some("3"));
        assert!(cfg.get("scheduling.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_values() {
        let mut cfg = Config::default();
        cfg.set("scheduling.energy_table", "simple").unwrap();
        cfg.set("scheduling.subtask_buffer_minutes", "5").unwrap();
        assert_eq!(cfg.scheduling.energy_table, EnergyTable::Simple);
        assert_eq!(cfg.scheduling.subtask_buffer_minutes, 5);
    }

    #[test]
    fn set_accepts_json_for_arrays() {
        let mut cfg = Config::default();
        cfg.set("breakdown.rules", r#"[{"keyword":"garden","template":"clean-garage"}]"#)
            .unwrap();
        assert_eq!(cfg.breakdown.rules.len(), 1);
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_values() {
        let mut cfg = Config::default();
        assert!(cfg.set("scheduling.nonexistent_key", "1").is_err());
        assert!(cfg.set("scheduling.day_start_hour", "early").is_err());
        assert!(cfg.set("scheduling.buffer_policy", "random").is_err());
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn set_rejects_values_that_fail_validation() {
        let mut cfg = Config::default();
        let err = cfg.set("scheduling.day_start_hour", "23").unwrap_err();
        assert!(err.to_string().contains("day window"));
        assert!(cfg.set("focus.queue_length", "0").is_err());
        let err = cfg
            .set("scheduling.subtask_buffer_minutes", "4294967295")
            .unwrap_err();
        assert!(err.to_string().contains("subtask_buffer_minutes"));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn unknown_template_in_rules_fails_validation() {
        let mut cfg = Config::default();
        cfg.breakdown.rules[0].template = "paint-fence".to_string();
        assert!(cfg.validate().is_err());

        let mut custom = TaskTemplate::daily_reading();
        custom.id = "paint-fence".to_string();
        cfg.templates.push(custom);
        assert!(cfg.validate().is_ok());
        assert!(cfg.registry().get("paint-fence").is_some());
    }

    #[test]
    fn save_and_load_through_tempdir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let missing = Config::load_from(&path).unwrap();
        assert_eq!(missing, Config::default());

        let mut cfg = Config::default();
        cfg.set("scheduling.buffer_policy", "flat").unwrap();
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.scheduling.buffer_policy, BufferPolicy::Flat);
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scheduling\nday_start_hour = 6").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
