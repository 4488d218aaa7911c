//! Shared configuration for podalert tools.
//!
//! TOML file + `PODALERT_` environment overrides, merged with figment.
//! Holds display defaults, the notification settings a pump manager
//! configures on the pod, and where the pending-alert store lives.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use podalert_core::{Locale, ReminderOffset, ReservoirLevel, SilencePodPreference};

/// Hours before expiration the reminder may be scheduled.
pub const EXPIRATION_REMINDER_HOURS: RangeInclusive<u32> = 1..=24;

/// Insulin units at which the low reservoir reminder may fire.
pub const LOW_RESERVOIR_UNITS: RangeInclusive<u32> = 10..=50;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("unknown config key '{key}'")]
    UnknownKey { key: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Global display defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Reminder settings applied when pairing a pod.
    #[serde(default)]
    pub notifications: NotificationSettings,

    /// Pending alert storage.
    #[serde(default)]
    pub store: StoreSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub locale: Locale,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            locale: Locale::default(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NotificationSettings {
    /// Hours before pod expiration to schedule the expiration reminder.
    #[serde(default = "default_expiration_reminder_hours")]
    pub expiration_reminder_hours: u32,

    /// Remaining insulin units that trigger the low reservoir reminder.
    #[serde(default = "default_low_reservoir_units")]
    pub low_reservoir_units: u32,

    /// Suppress audible pod beeps.
    #[serde(default)]
    pub silence_pod: SilencePodPreference,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            expiration_reminder_hours: default_expiration_reminder_hours(),
            low_reservoir_units: default_low_reservoir_units(),
            silence_pod: SilencePodPreference::default(),
        }
    }
}

fn default_expiration_reminder_hours() -> u32 {
    2
}
fn default_low_reservoir_units() -> u32 {
    10
}

impl NotificationSettings {
    pub fn expiration_reminder_offset(&self) -> Result<ReminderOffset, ConfigError> {
        ReminderOffset::from_hours(self.expiration_reminder_hours).map_err(|e| {
            ConfigError::Validation {
                field: "notifications.expiration_reminder_hours".into(),
                reason: e.to_string(),
            }
        })
    }

    pub fn low_reservoir_level(&self) -> Result<ReservoirLevel, ConfigError> {
        ReservoirLevel::from_units(f64::from(self.low_reservoir_units)).map_err(|e| {
            ConfigError::Validation {
                field: "notifications.low_reservoir_units".into(),
                reason: e.to_string(),
            }
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StoreSettings {
    /// Override for the pending alert store file.
    pub path: Option<PathBuf>,
}

// ── Validation ──────────────────────────────────────────────────────

fn check_range(field: &str, value: u32, range: &RangeInclusive<u32>) -> Result<(), ConfigError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Validation {
            field: field.into(),
            reason: format!(
                "expected {}-{}, got {value}",
                range.start(),
                range.end()
            ),
        })
    }
}

impl Config {
    /// Check values against the ranges the pod accepts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "notifications.expiration_reminder_hours",
            self.notifications.expiration_reminder_hours,
            &EXPIRATION_REMINDER_HOURS,
        )?;
        check_range(
            "notifications.low_reservoir_units",
            self.notifications.low_reservoir_units,
            &LOW_RESERVOIR_UNITS,
        )?;
        match self.defaults.output.as_str() {
            "table" | "json" | "json-compact" | "yaml" | "plain" => {}
            other => {
                return Err(ConfigError::Validation {
                    field: "defaults.output".into(),
                    reason: format!("unknown output format '{other}'"),
                });
            }
        }
        match self.defaults.color.as_str() {
            "auto" | "always" | "never" => Ok(()),
            other => Err(ConfigError::Validation {
                field: "defaults.color".into(),
                reason: format!("expected 'auto', 'always', or 'never', got '{other}'"),
            }),
        }
    }

    /// Set a single dotted key from its string form, validating the result.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::Validation {
            field: key.into(),
            reason,
        };
        let parse_u32 = |v: &str| {
            v.parse::<u32>()
                .map_err(|e| invalid(format!("'{v}' is not a whole number: {e}")))
        };

        let mut next = self.clone();
        match key {
            "defaults.output" => next.defaults.output = value.into(),
            "defaults.color" => next.defaults.color = value.into(),
            "defaults.locale" => {
                next.defaults.locale = value
                    .parse()
                    .map_err(|_| invalid(format!("unsupported locale '{value}'")))?;
            }
            "notifications.expiration_reminder_hours" => {
                next.notifications.expiration_reminder_hours = parse_u32(value)?;
            }
            "notifications.low_reservoir_units" => {
                next.notifications.low_reservoir_units = parse_u32(value)?;
            }
            "notifications.silence_pod" => {
                next.notifications.silence_pod = value
                    .parse()
                    .map_err(|_| invalid(format!("expected 'enabled' or 'disabled', got '{value}'")))?;
            }
            "store.path" => {
                next.store.path = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            _ => return Err(ConfigError::UnknownKey { key: key.into() }),
        }

        next.validate()?;
        *self = next;
        Ok(())
    }

    /// Where the pending alert store lives.
    pub fn store_path(&self) -> PathBuf {
        self.store.path.clone().unwrap_or_else(default_store_path)
    }
}

// ── Paths ───────────────────────────────────────────────────────────

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "podalert", "podalert")
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("podalert");
    p
}

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Default pending alert store location (platform data dir).
pub fn default_store_path() -> PathBuf {
    project_dirs().map_or_else(
        || dirs_fallback().join("pending-alerts.json"),
        |dirs| dirs.data_dir().join("pending-alerts.json"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// `PODALERT_*` variables read by the CLI flags rather than the config file.
const CLI_ENV_KEYS: &[&str] = &["config", "store", "locale", "output"];

/// Load config from `path` + `PODALERT_` environment variables.
///
/// Nested keys use a double underscore:
/// `PODALERT_NOTIFICATIONS__LOW_RESERVOIR_UNITS=20`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = file_figment(path).merge(
        Env::prefixed("PODALERT_")
            .ignore(CLI_ENV_KEYS)
            .split("__"),
    );
    extract(&figment)
}

/// Load only what is written in `path`, on top of the defaults.
///
/// Used before editing and saving the file, so environment overrides
/// never end up persisted.
pub fn load_file_config(path: &Path) -> Result<Config, ConfigError> {
    extract(&file_figment(path))
}

fn file_figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
}

fn extract(figment: &Figment) -> Result<Config, ConfigError> {
    let config: Config = figment.extract()?;
    config.validate()?;
    Ok(config)
}

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config, falling back to defaults if it is missing or invalid.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "using default configuration");
        Config::default()
    })
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_pod_pairing_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.notifications.expiration_reminder_hours, 2);
        assert_eq!(cfg.notifications.low_reservoir_units, 10);
        assert_eq!(cfg.notifications.silence_pod, SilencePodPreference::Disabled);
        assert_eq!(cfg.defaults.locale, Locale::En);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[defaults]
locale = "zh-Hans"

[notifications]
expiration_reminder_hours = 4
silence_pod = "enabled"
"#,
        )
        .unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.defaults.locale, Locale::ZhHans);
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.notifications.expiration_reminder_hours, 4);
        assert_eq!(cfg.notifications.low_reservoir_units, 10);
        assert!(cfg.notifications.silence_pod.is_silenced());
    }

    #[test]
    fn file_only_load_reads_the_file_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(load_file_config(&path).unwrap(), Config::default());

        std::fs::write(&path, "[notifications]\nlow_reservoir_units = 30\n").unwrap();
        let cfg = load_file_config(&path).unwrap();
        assert_eq!(cfg.notifications.low_reservoir_units, 30);
        assert_eq!(cfg.notifications.expiration_reminder_hours, 2);
    }

    #[test]
    fn out_of_range_file_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[notifications]\nlow_reservoir_units = 5\n").unwrap();
        assert!(matches!(
            load_config_from(&path),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.set("notifications.low_reservoir_units", "25").unwrap();
        cfg.set("store.path", "/var/lib/podalert/pending.json").unwrap();
        save_config_to(&cfg, &path).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), cfg);
    }

    #[test]
    fn set_validates_and_leaves_config_untouched_on_error() {
        let mut cfg = Config::default();
        assert!(cfg.set("notifications.expiration_reminder_hours", "25").is_err());
        assert!(cfg.set("notifications.expiration_reminder_hours", "two").is_err());
        assert!(cfg.set("defaults.color", "sometimes").is_err());
        assert!(matches!(
            cfg.set("pod.address", "x"),
            Err(ConfigError::UnknownKey { .. })
        ));
        assert_eq!(cfg, Config::default());

        cfg.set("defaults.locale", "zh").unwrap();
        assert_eq!(cfg.defaults.locale, Locale::ZhHans);
    }

    #[test]
    fn notification_payloads() {
        let settings = NotificationSettings::default();
        assert_eq!(
            settings.expiration_reminder_offset().unwrap().as_secs(),
            7200.0_f64
        );
        assert_eq!(
            settings.low_reservoir_level().unwrap(),
            ReservoirLevel::from_units(10.0).unwrap()
        );
    }

    #[test]
    fn store_path_prefers_override() {
        let mut cfg = Config::default();
        assert!(cfg.store_path().ends_with("pending-alerts.json"));
        cfg.store.path = Some(PathBuf::from("/tmp/alerts.json"));
        assert_eq!(cfg.store_path(), PathBuf::from("/tmp/alerts.json"));
    }
}
