//! Configuration for the scheduler and study planner.
//!
//! Loaded from a TOML file; every field has a default so a partial or
//! missing file yields the reference SM-2 behaviour.

use crate::models::review_state::{DEFAULT_EASE_FACTOR, MIN_EASE_FACTOR};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub study: StudyConfig,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.scheduler.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    #[serde(default = "default_initial_ease")]
    pub initial_ease: f64,
    #[serde(default = "default_minimum_ease")]
    pub minimum_ease: f64,
    /// Upper bound on the review interval. Unbounded when absent.
    #[serde(default)]
    pub max_interval_days: Option<u32>,
}

fn default_initial_ease() -> f64 {
    DEFAULT_EASE_FACTOR
}

fn default_minimum_ease() -> f64 {
    MIN_EASE_FACTOR
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            initial_ease: DEFAULT_EASE_FACTOR,
            minimum_ease: MIN_EASE_FACTOR,
            max_interval_days: None,
        }
    }
}

impl SchedulerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The floor can be raised, never lowered below 1.3.
        if !self.minimum_ease.is_finite() || self.minimum_ease < MIN_EASE_FACTOR {
            return Err(ConfigError::Invalid(format!(
                "minimum_ease must be at least {}, got {}",
                MIN_EASE_FACTOR, self.minimum_ease
            )));
        }
        if !self.initial_ease.is_finite() || self.initial_ease < self.minimum_ease {
            return Err(ConfigError::Invalid(format!(
                "initial_ease {} is below minimum_ease {}",
                self.initial_ease, self.minimum_ease
            )));
        }
        if self.max_interval_days == Some(0) {
            return Err(ConfigError::Invalid("max_interval_days must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyConfig {
    /// Maximum number of cards planned into one learning session.
    #[serde(default = "default_review_limit")]
    pub review_limit: Option<usize>,
}

fn default_review_limit() -> Option<usize> {
    Some(200)
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            review_limit: Some(200),
        }
    }
}
