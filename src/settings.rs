//! Session settings
//!
//! Raw values arrive as signed integers so that negative input can be
//! represented and rejected. `validate` turns them into a `TimerConfig`.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_PENALTY_SECS, DEFAULT_TIME_LEFT_SECS};
use crate::error::ConfigError;

/// Unvalidated session settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Countdown length in seconds (also the `reset()` target)
    pub initial_time_secs: i64,
    /// Seconds deducted per penalty
    pub penalty_secs: i64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_time_secs: DEFAULT_TIME_LEFT_SECS as i64,
            penalty_secs: DEFAULT_PENALTY_SECS as i64,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Check ranges and produce a usable timer configuration
    pub fn validate(&self) -> Result<TimerConfig, ConfigError> {
        TimerConfig::new(self.initial_time_secs, self.penalty_secs)
    }
}

/// Validated timer configuration. Both values are at least one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerConfig {
    initial_time_secs: u32,
    penalty_secs: u32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            initial_time_secs: DEFAULT_TIME_LEFT_SECS,
            penalty_secs: DEFAULT_PENALTY_SECS,
        }
    }
}

impl TimerConfig {
    pub fn new(initial_time_secs: i64, penalty_secs: i64) -> Result<Self, ConfigError> {
        Ok(Self {
            initial_time_secs: positive_secs(initial_time_secs)
                .ok_or(ConfigError::InitialTimeOutOfRange(initial_time_secs))?,
            penalty_secs: positive_secs(penalty_secs)
                .ok_or(ConfigError::PenaltyOutOfRange(penalty_secs))?,
        })
    }

    pub fn initial_time_secs(&self) -> u32 {
        self.initial_time_secs
    }

    pub fn penalty_secs(&self) -> u32 {
        self.penalty_secs
    }
}

/// Accept `1..=u32::MAX`
pub(crate) fn positive_secs(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|v| *v > 0)
}
