//! TOML-based configuration.
//!
//! Stores defaults for scoring runs and an optional rule-set override:
//! - Participant selection defaults (observer, timezone policy)
//! - Output defaults (display timezone, ranked rows shown)
//! - `[rules]`, replacing the built-in [`ScoringRules`] wholesale
//!
//! Configuration is stored at `~/.config/tzgrid/config.toml`. Set
//! `TZGRID_CONFIG_DIR` to use another directory.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::rules::ScoringRules;

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "TZGRID_CONFIG_DIR";

/// Defaults applied to `score` and `heatmap` runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_true")]
    pub exclude_null_timezones: bool,
    #[serde(default = "default_true")]
    pub include_red_participants: bool,
    /// Observer always included in the scored pool.
    #[serde(default)]
    pub yourself: Option<String>,
    #[serde(default = "default_display_timezone")]
    pub display_timezone: String,
    #[serde(default = "default_top")]
    pub top: usize,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/tzgrid/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Rule-set override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<ScoringRules>,
}

fn default_true() -> bool {
    true
}
fn default_display_timezone() -> String {
    "UTC".into()
}
fn default_top() -> usize {
    5
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            exclude_null_timezones: true,
            include_red_participants: true,
            yourself: None,
            display_timezone: default_display_timezone(),
            top: default_top(),
        }
    }
}

/// Returns the configuration directory (`~/.config/tzgrid` or
/// `$TZGRID_CONFIG_DIR`).
///
/// # Errors
/// Returns an error if the home directory cannot be determined.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = dirs::home_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(home.join(".config").join("tzgrid"))
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

    fn set_json_value_by_path(root: &mut serde_json::Value, key: &str, value: &str) -> Result<()> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown().into());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<i64>() {
                        serde_json::Value::Number(n.into())
                    } else {
                        return Err(invalid(format!("cannot parse '{value}' as integer")).into());
                    }
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown().into())
    }

    /// Path of the config file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined.
    pub fn path() -> Result<PathBuf> {
        Ok(config_dir()?.join("config.toml"))
    }

    /// Load from the default path, or defaults if no file exists.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, or defaults if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
                .into())
            }
        };
        toml::from_str(&content).map_err(|e| {
            ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Persist to the default path.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Persist to `path`, creating parent directories.
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
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

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// Keys under `rules` only exist once a rule override is present; set
    /// `rules` itself to a JSON object to create one.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if key == "rules" {
            let rules: ScoringRules = serde_json::from_str(value).map_err(|e| {
                ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: e.to_string(),
                }
            })?;
            self.rules = Some(rules);
            return Ok(());
        }
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Effective rule set: the override, or the built-in defaults.
    pub fn rules(&self) -> ScoringRules {
        self.rules.clone().unwrap_or_default()
    }
}
