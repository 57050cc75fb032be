//! TOML-based application configuration.
//!
//! Stores:
//! - Planner defaults (window start, probe step, break and wrap-up thresholds)
//! - HTTP server bind address
//! - Log level
//!
//! Configuration is stored at `~/.config/smartday/config.toml` unless an
//! explicit path is given.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::clock::{parse_hhmm, DEFAULT_START};
use crate::error::ConfigError;
use crate::scheduler::SchedulerConfig;

/// Upper bound for every minute-valued planner setting (one day).
pub const MAX_SETTING_MINUTES: i64 = 24 * 60;

/// Planner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Window start used when a request has no `start_time` (HH:MM).
    #[serde(default = "default_start_time")]
    pub default_start_time: String,
    #[serde(default = "default_probe_step")]
    pub probe_step_minutes: i64,
    #[serde(default = "default_break_after")]
    pub break_after_minutes: i64,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: i64,
    #[serde(default = "default_wrap_up_min")]
    pub wrap_up_min_minutes: i64,
    #[serde(default = "default_wrap_up_max")]
    pub wrap_up_max_minutes: i64,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/smartday/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

// Default functions
fn default_start_time() -> String {
    DEFAULT_START.into()
}
fn default_probe_step() -> i64 {
    SchedulerConfig::default().probe_step_minutes
}
fn default_break_after() -> i64 {
    SchedulerConfig::default().break_after_minutes
}
fn default_break_minutes() -> i64 {
    SchedulerConfig::default().break_minutes
}
fn default_wrap_up_min() -> i64 {
    SchedulerConfig::default().wrap_up_min_minutes
}
fn default_wrap_up_max() -> i64 {
    SchedulerConfig::default().wrap_up_max_minutes
}
fn default_bind() -> String {
    "127.0.0.1:8000".into()
}
fn default_level() -> String {
    "warn".into()
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_start_time: default_start_time(),
            probe_step_minutes: default_probe_step(),
            break_after_minutes: default_break_after(),
            break_minutes: default_break_minutes(),
            wrap_up_min_minutes: default_wrap_up_min(),
            wrap_up_max_minutes: default_wrap_up_max(),
        }
    }
}

impl PlannerConfig {
    /// Parsed `default_start_time`, falling back to 09:00 if it is malformed.
    pub fn default_start(&self) -> NaiveTime {
        parse_hhmm(&self.default_start_time)
            .or_else(|| parse_hhmm(DEFAULT_START))
            .unwrap_or(NaiveTime::MIN)
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            probe_step_minutes: self.probe_step_minutes,
            break_after_minutes: self.break_after_minutes,
            break_minutes: self.break_minutes,
            wrap_up_min_minutes: self.wrap_up_min_minutes,
            wrap_up_max_minutes: self.wrap_up_max_minutes,
        }
    }

    /// Reject values the planner cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if parse_hhmm(&self.default_start_time).is_none() {
            return Err(ConfigError::InvalidValue {
                key: "planner.default_start_time".into(),
                message: format!("'{}' is not HH:MM", self.default_start_time),
            });
        }
        if self.probe_step_minutes <= 0 {
            return Err(ConfigError::InvalidValue {
                key: "planner.probe_step_minutes".into(),
                message: "must be greater than 0".into(),
            });
        }
        let minutes = [
            ("planner.probe_step_minutes", self.probe_step_minutes),
            ("planner.break_after_minutes", self.break_after_minutes),
            ("planner.break_minutes", self.break_minutes),
            ("planner.wrap_up_min_minutes", self.wrap_up_min_minutes),
            ("planner.wrap_up_max_minutes", self.wrap_up_max_minutes),
        ];
        for (key, value) in minutes {
            if !(0..=MAX_SETTING_MINUTES).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    key: key.into(),
                    message: format!("must be between 0 and {MAX_SETTING_MINUTES}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            planner: PlannerConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
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
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        if key.is_empty() {
            return Err(unknown());
        }

        let mut parts = key.split('.').peekable();
        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Number(_) => {
                        if let Ok(n) = value.parse::<i64>() {
                            serde_json::Value::Number(n.into())
                        } else {
                            return Err(invalid(format!("cannot parse '{value}' as integer")));
                        }
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("only leaf values can be set".into()));
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

    /// Default location of the config file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, creating it with defaults if missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`, creating it with defaults if missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config =
                    toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                        path: path.to_path_buf(),
                        message: e.to_string(),
                    })?;
                cfg.planner.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::default_path()?)
    }

    /// Persist to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
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

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting planner settings are unusable.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        updated.planner.validate()?;
        *self = updated;
        Ok(())
    }

    /// Load from `path`, or from the default location when none is given.
    pub fn load_at(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_from(path),
            None => Self::load(),
        }
    }
}
