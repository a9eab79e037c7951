//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Tick interval and clock display format
//! - Default countdown duration
//! - World clock city list
//! - Weather city
//! - The alarm list, reminders and calendar events
//!
//! Configuration is stored at `~/.config/orbit/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::alarm::{Alarm, AlarmBook};
use crate::calendar::Calendar;
use crate::error::ConfigError;
use crate::panel::ToolsPanel;
use crate::reminders::ReminderList;
use crate::timer::Countdown;
use crate::world_clock::{WorldClock, DEFAULT_CITIES};

/// Clock and tick configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// strftime-style format used when printing times.
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

/// Countdown configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownConfig {
    #[serde(default = "default_countdown_secs")]
    pub default_duration_secs: u64,
}

/// World clock configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldClockConfig {
    /// City names from the built-in catalog.
    #[serde(default = "default_cities")]
    pub cities: Vec<String>,
}

/// Weather configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// City used when none is given. Unset means "ask the provider to locate".
    #[serde(default)]
    pub default_city: Option<String>,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/orbit/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub clock: ClockConfig,
    #[serde(default)]
    pub countdown: CountdownConfig,
    #[serde(default)]
    pub world_clock: WorldClockConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default = "default_alarms")]
    pub alarms: AlarmBook,
    #[serde(default)]
    pub reminders: ReminderList,
    #[serde(default)]
    pub events: Calendar,
}

// Default functions
fn default_tick_interval_ms() -> u64 {
    1000
}
fn default_time_format() -> String {
    "%H:%M".into()
}
fn default_countdown_secs() -> u64 {
    5 * 60
}
fn default_cities() -> Vec<String> {
    DEFAULT_CITIES.iter().map(|c| c.to_string()).collect()
}
fn default_alarms() -> AlarmBook {
    AlarmBook::from_alarms(Alarm::seed())
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            time_format: default_time_format(),
        }
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            default_duration_secs: default_countdown_secs(),
        }
    }
}

impl Default for WorldClockConfig {
    fn default() -> Self {
        Self {
            cities: default_cities(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clock: ClockConfig::default(),
            countdown: CountdownConfig::default(),
            world_clock: WorldClockConfig::default(),
            weather: WeatherConfig::default(),
            alarms: default_alarms(),
            reminders: ReminderList::default(),
            events: Calendar::default(),
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

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            let is_leaf = parts.peek().is_none();
            if is_leaf {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value.parse::<bool>().map_err(|e| invalid(e.to_string()))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    // Optional strings are stored as null until first set.
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
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
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
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
    /// Returns an error if the key is unknown or the value does not fit
    /// the key's type. The config is unchanged on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Reject values serde accepts but the tick loop cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.clock.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "clock.tick_interval_ms".into(),
                message: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.clock.tick_interval_ms)
    }

    /// A panel loaded with the configured alarms and countdown length.
    pub fn panel(&self) -> ToolsPanel {
        ToolsPanel::new(
            self.alarms.clone(),
            Countdown::new(self.countdown.default_duration_secs),
        )
    }

    /// The configured world clock, plus any city names not in the catalog.
    pub fn world_clock(&self) -> (WorldClock, Vec<String>) {
        WorldClock::from_names(self.world_clock.cities.as_slice())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::CountdownState;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.clock.tick_interval_ms, 1000);
        assert_eq!(parsed.alarms, cfg.alarms);
    }

    #[test]
    fn default_seeds_two_alarms() {
        let cfg = Config::default();
        let alarms: Vec<_> = cfg.alarms.iter().collect();
        assert_eq!(alarms.len(), 2);
        assert_eq!(alarms[0].label(), "Morning Brief");
        assert!(alarms[0].active);
        assert_eq!(alarms[1].label(), "Deep Work");
        assert!(!alarms[1].active);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg.countdown.default_duration_secs, 300);
        assert_eq!(cfg.world_clock.cities.len(), 4);
        assert_eq!(cfg.alarms.len(), 2);
        assert!(cfg.reminders.is_empty());
        assert!(cfg.events.is_empty());
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("clock.tick_interval_ms").as_deref(), Some("1000"));
        assert_eq!(cfg.get("clock.time_format").as_deref(), Some("%H:%M"));
        assert!(cfg.get("clock.missing_key").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn set_updates_nested_number() {
        let mut cfg = Config::default();
        cfg.set("countdown.default_duration_secs", "90").unwrap();
        assert_eq!(cfg.countdown.default_duration_secs, 90);
    }

    #[test]
    fn set_updates_optional_string() {
        let mut cfg = Config::default();
        cfg.set("weather.default_city", "Lisbon").unwrap();
        assert_eq!(cfg.weather.default_city.as_deref(), Some("Lisbon"));
    }

    #[test]
    fn set_updates_array_from_json() {
        let mut cfg = Config::default();
        cfg.set("world_clock.cities", r#"["Paris","Lima"]"#).unwrap();
        assert_eq!(cfg.world_clock.cities, vec!["Paris", "Lima"]);
    }

    #[test]
    fn set_rejects_unknown_key() {
        let mut cfg = Config::default();
        assert!(matches!(
            cfg.set("clock.nonexistent_key", "1"),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn set_rejects_invalid_type_and_leaves_config_unchanged() {
        let mut cfg = Config::default();
        assert!(cfg.set("clock.tick_interval_ms", "fast").is_err());
        assert!(cfg.set("clock.tick_interval_ms", "0").is_err());
        assert_eq!(cfg.clock.tick_interval_ms, 1000);
    }

    #[test]
    fn set_rejects_invalid_alarm_json() {
        let mut cfg = Config::default();
        let bad = r#"[{"id":"00000000-0000-0000-0000-000000000001","time":"25:00","label":"x"}]"#;
        assert!(cfg.set("alarms", bad).is_err());
        assert_eq!(cfg.alarms.len(), 2);
    }

    #[test]
    fn builders_follow_config() {
        let mut cfg = Config::default();
        cfg.set("countdown.default_duration_secs", "42").unwrap();
        cfg.set("world_clock.cities", r#"["Tokyo","Atlantis"]"#).unwrap();

        assert_eq!(cfg.tick_interval(), Duration::from_secs(1));
        let panel = cfg.panel();
        assert_eq!(panel.countdown().total_duration_secs(), 42);
        assert_eq!(panel.countdown().remaining_secs(), 0);
        assert_eq!(panel.countdown().state(), CountdownState::Editing);
        assert_eq!(panel.alarms().len(), 2);

        let (clock, unknown) = cfg.world_clock();
        assert_eq!(clock.cities().len(), 1);
        assert_eq!(unknown, vec!["Atlantis"]);
    }

    #[test]
    fn load_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        let again = Config::load_from(&path).unwrap();
        assert_eq!(again.alarms, cfg.alarms);
    }

    #[test]
    fn load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[clock]\ntick_interval_ms = \"soon\"\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::LoadFailed { .. })
        ));
    }
}
