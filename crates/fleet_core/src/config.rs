use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_CONFIG_PATH: &str = "ride.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RideSettings {
    pub fleet_size: usize,
    pub advance_interval_ms: u64,
    pub blink_interval_ms: u64,
    pub history_display_limit: usize,
}

impl Default for RideSettings {
    fn default() -> Self {
        Self {
            fleet_size: 21,
            advance_interval_ms: 5_000,
            blink_interval_ms: 5_000,
            history_display_limit: 3,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("fleet_size must be at least 1")]
    EmptyFleet,
    #[error("{field} must be greater than zero")]
    ZeroInterval { field: &'static str },
    #[error("history_display_limit must be at least 1")]
    EmptyHistory,
    #[error("invalid value '{value}' for {key}")]
    InvalidOverride { key: String, value: String },
}

impl RideSettings {
    pub fn advance_interval(&self) -> Duration {
        Duration::from_millis(self.advance_interval_ms)
    }

    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.blink_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fleet_size == 0 {
            return Err(ConfigError::EmptyFleet);
        }
        if self.advance_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                field: "advance_interval_ms",
            });
        }
        if self.blink_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval {
                field: "blink_interval_ms",
            });
        }
        if self.history_display_limit == 0 {
            return Err(ConfigError::EmptyHistory);
        }
        Ok(())
    }
}

/// Optional keys accepted in `ride.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    fleet_size: Option<usize>,
    advance_interval_ms: Option<u64>,
    blink_interval_ms: Option<u64>,
    history_display_limit: Option<usize>,
}

/// Loads settings from `ride.toml` (or `$RIDE_CONFIG`) and the process
/// environment.
pub fn load_settings() -> anyhow::Result<RideSettings> {
    let path = std::env::var("RIDE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));
    load_settings_from(Some(&path), |key| std::env::var(key).ok())
}

/// Defaults, then the file at `path` when it exists, then environment
/// overrides looked up through `env`. `APP__` aliases win over `RIDE_` keys.
pub fn load_settings_from(
    path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<RideSettings> {
    let mut settings = RideSettings::default();

    if let Some(path) = path.filter(|path| path.exists()) {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let file_cfg: SettingsFile = toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        if let Some(v) = file_cfg.fleet_size {
            settings.fleet_size = v;
        }
        if let Some(v) = file_cfg.advance_interval_ms {
            settings.advance_interval_ms = v;
        }
        if let Some(v) = file_cfg.blink_interval_ms {
            settings.blink_interval_ms = v;
        }
        if let Some(v) = file_cfg.history_display_limit {
            settings.history_display_limit = v;
        }
    }

    if let Some(v) = env_override(&env, "FLEET_SIZE")? {
        settings.fleet_size = v;
    }
    if let Some(v) = env_override(&env, "ADVANCE_INTERVAL_MS")? {
        settings.advance_interval_ms = v;
    }
    if let Some(v) = env_override(&env, "BLINK_INTERVAL_MS")? {
        settings.blink_interval_ms = v;
    }
    if let Some(v) = env_override(&env, "HISTORY_DISPLAY_LIMIT")? {
        settings.history_display_limit = v;
    }

    settings.validate()?;
    Ok(settings)
}

fn env_override<T: std::str::FromStr>(
    env: &impl Fn(&str) -> Option<String>,
    suffix: &str,
) -> Result<Option<T>, ConfigError> {
    let mut found = None;
    for key in [format!("RIDE_{suffix}"), format!("APP__{suffix}")] {
        if let Some(value) = env(&key) {
            let parsed = value
                .trim()
                .parse::<T>()
                .map_err(|_| ConfigError::InvalidOverride {
                    key: key.clone(),
                    value: value.clone(),
                })?;
            found = Some(parsed);
        }
    }
    Ok(found)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
