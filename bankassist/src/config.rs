//! Configuration for the pipeline stepper and its timer.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::errors::{ConfigError, Result};

/// When the first stage of a new run leaves `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartPolicy {
    /// Stage 0 is `InProgress` as soon as the run is created.
    #[default]
    Eager,
    /// Every stage starts `Pending`; the first tick promotes stage 0.
    OnFirstTick,
}

/// Configuration for a [`PipelineStepper`](crate::pipeline::PipelineStepper).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepperConfig {
    /// Wall-clock cadence of the timer in milliseconds.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Smallest progress increment per tick.
    #[serde(default = "default_min_increment")]
    pub min_increment: u8,
    /// Largest progress increment per tick.
    #[serde(default = "default_max_increment")]
    pub max_increment: u8,
    /// Progress a stage has when it becomes `InProgress`.
    #[serde(default = "default_initial_progress")]
    pub initial_progress: u8,
    /// Lower bound of the simulated processing time of a stage.
    #[serde(default = "default_min_elapsed_secs")]
    pub min_elapsed_secs: f64,
    /// Upper bound of the simulated processing time of a stage.
    #[serde(default = "default_max_elapsed_secs")]
    pub max_elapsed_secs: f64,
    /// When stage 0 is started.
    #[serde(default)]
    pub start_policy: StartPolicy,
}

fn default_tick_interval_ms() -> u64 {
    800
}

fn default_min_increment() -> u8 {
    3
}

fn default_max_increment() -> u8 {
    15
}

fn default_initial_progress() -> u8 {
    10
}

fn default_min_elapsed_secs() -> f64 {
    0.8
}

fn default_max_elapsed_secs() -> f64 {
    4.0
}

impl Default for StepperConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            min_increment: default_min_increment(),
            max_increment: default_max_increment(),
            initial_progress: default_initial_progress(),
            min_elapsed_secs: default_min_elapsed_secs(),
            max_elapsed_secs: default_max_elapsed_secs(),
            start_policy: StartPolicy::default(),
        }
    }
}

impl StepperConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    /// Sets the tick interval.
    #[must_use]
    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Sets the increment range (inclusive).
    #[must_use]
    pub fn with_increment_range(mut self, min: u8, max: u8) -> Self {
        self.min_increment = min;
        self.max_increment = max;
        self
    }

    /// Sets the initial progress of started stages.
    #[must_use]
    pub fn with_initial_progress(mut self, progress: u8) -> Self {
        self.initial_progress = progress;
        self
    }

    /// Sets the simulated elapsed-seconds range (inclusive).
    #[must_use]
    pub fn with_elapsed_range(mut self, min: f64, max: f64) -> Self {
        self.min_elapsed_secs = min;
        self.max_elapsed_secs = max;
        self
    }

    /// Sets the start policy.
    #[must_use]
    pub fn with_start_policy(mut self, policy: StartPolicy) -> Self {
        self.start_policy = policy;
        self
    }

    /// Returns the tick interval as a [`Duration`].
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Checks that every range is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.min_increment == 0
            || self.min_increment > self.max_increment
            || self.max_increment > 100
        {
            return Err(ConfigError::IncrementRange {
                min: self.min_increment,
                max: self.max_increment,
            });
        }
        if self.initial_progress >= 100 {
            return Err(ConfigError::InitialProgress(self.initial_progress));
        }
        let (min, max) = (self.min_elapsed_secs, self.max_elapsed_secs);
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(ConfigError::ElapsedRange {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(())
    }

    /// Worst-case number of ticks to finish `stage_count` stages.
    ///
    /// Each stage needs at most `ceil(100 / min_increment)` advancing ticks.
    /// Under [`StartPolicy::OnFirstTick`] one extra tick promotes stage 0.
    #[must_use]
    pub fn max_ticks(&self, stage_count: usize) -> usize {
        let step = usize::from(self.min_increment.max(1));
        let promotion = usize::from(self.start_policy == StartPolicy::OnFirstTick);
        stage_count * 100_usize.div_ceil(step) + promotion
    }
}
