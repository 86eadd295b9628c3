use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::input::InputSettings;
use crate::timer::DEFAULT_DURATION;

const FILENAME: &str = "config.yaml";
const APP_DIR: &str = "podium";
const MAX_TIMER_MINUTES: u64 = 600;

pub const KEYS: &[&str] = &[
    "defaults.theme",
    "defaults.windowed",
    "timer.minutes",
    "input.keyboard",
    "input.touch",
    "input.pointer",
    "input.swipe_threshold",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults: Option<DefaultsConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timer: Option<TimerConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<InputConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub windowed: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Talk length the countdown starts from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyboard: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub touch: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swipe_threshold: Option<f32>,
}

impl Config {
    pub fn path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                anyhow::anyhow!("No config found. Run `podium config show` to see defaults.")
            } else {
                anyhow::anyhow!("Failed to read config: {e}")
            }
        })?;
        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Load the user config. Only a missing file falls back to defaults; a
    /// file that exists but does not parse is an error.
    pub fn load_or_default() -> Result<Self> {
        match Self::path() {
            Ok(path) => Self::load_from_or_default(&path),
            Err(e) => {
                tracing::debug!("using default config: {e}");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let contents = format!("# Podium configuration\n{yaml}");
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn theme(&self) -> Option<&str> {
        self.defaults.as_ref().and_then(|d| d.theme.as_deref())
    }

    pub fn windowed(&self) -> bool {
        self.defaults
            .as_ref()
            .and_then(|d| d.windowed)
            .unwrap_or(false)
    }

    pub fn timer_duration(&self) -> Duration {
        self.timer
            .as_ref()
            .and_then(|t| t.minutes)
            .map(|m| Duration::from_secs(m * 60))
            .unwrap_or(DEFAULT_DURATION)
    }

    pub fn input_settings(&self) -> InputSettings {
        let defaults = InputSettings::default();
        let Some(input) = &self.input else {
            return defaults;
        };
        InputSettings {
            keyboard: input.keyboard.unwrap_or(defaults.keyboard),
            touch: input.touch.unwrap_or(defaults.touch),
            pointer: input.pointer.unwrap_or(defaults.pointer),
            swipe_threshold: input.swipe_threshold.unwrap_or(defaults.swipe_threshold),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaults.theme" => {
                match value {
                    "light" | "dark" => {}
                    _ => anyhow::bail!("Invalid theme: {value}. Must be 'light' or 'dark'."),
                }
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .theme = Some(value.to_string());
            }
            "defaults.windowed" => {
                self.defaults
                    .get_or_insert_with(DefaultsConfig::default)
                    .windowed = Some(parse_bool(key, value)?);
            }
            "timer.minutes" => {
                let minutes = value
                    .parse::<u64>()
                    .ok()
                    .filter(|m| (1..=MAX_TIMER_MINUTES).contains(m))
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "Invalid timer.minutes: {value}. Must be a whole number from 1 to {MAX_TIMER_MINUTES}."
                        )
                    })?;
                self.timer.get_or_insert_with(TimerConfig::default).minutes = Some(minutes);
            }
            "input.keyboard" => {
                self.input.get_or_insert_with(InputConfig::default).keyboard =
                    Some(parse_bool(key, value)?);
            }
            "input.touch" => {
                self.input.get_or_insert_with(InputConfig::default).touch =
                    Some(parse_bool(key, value)?);
            }
            "input.pointer" => {
                self.input.get_or_insert_with(InputConfig::default).pointer =
                    Some(parse_bool(key, value)?);
            }
            "input.swipe_threshold" => {
                let threshold = value
                    .parse::<f32>()
                    .ok()
                    .filter(|t| t.is_finite() && *t > 0.0)
                    .ok_or_else(|| {
                        anyhow::anyhow!(
                            "Invalid input.swipe_threshold: {value}. Must be a positive number."
                        )
                    })?;
                self.input
                    .get_or_insert_with(InputConfig::default)
                    .swipe_threshold = Some(threshold);
            }
            _ => anyhow::bail!(
                "Unknown config key: {key}. Valid keys: {}",
                KEYS.join(", ")
            ),
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value {
        "true" | "yes" | "on" => Ok(true),
        "false" | "no" | "off" => Ok(false),
        _ => anyhow::bail!("Invalid {key}: {value}. Must be 'true' or 'false'."),
    }
}
