//! Error types for the bankassist crate.
//!
//! Advancing a run never fails. Errors only arise while building a run
//! (bad stage lists, invalid configuration) or while supervising the timer
//! task that drives it.

use thiserror::Error;

/// Convenience result alias used across the crate.
pub type Result<T, E = BankAssistError> = std::result::Result<T, E>;

/// The main error type for bankassist operations.
#[derive(Debug, Error)]
pub enum BankAssistError {
    /// The stepper configuration is invalid.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// A run was requested with no stages.
    #[error("Pipeline has no stages")]
    EmptyPipeline,

    /// Two stages share the same identifier.
    #[error("Duplicate stage identifier: {0}")]
    DuplicateStage(String),

    /// The timer task ended abnormally.
    #[error("Runner error: {0}")]
    Runner(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for BankAssistError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Error raised when a [`StepperConfig`](crate::config::StepperConfig) fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The tick interval must be positive.
    #[error("tick_interval_ms must be greater than zero")]
    ZeroInterval,

    /// The progress increment range is empty or out of bounds.
    #[error("Invalid increment range [{min}, {max}]: expected 1 <= min <= max <= 100")]
    IncrementRange {
        /// Lower bound.
        min: u8,
        /// Upper bound.
        max: u8,
    },

    /// The initial progress of a started stage must leave room to advance.
    #[error("initial_progress must be below 100, got {0}")]
    InitialProgress(u8),

    /// The elapsed-seconds range is empty, negative or not finite.
    #[error("Invalid elapsed range [{min}, {max}]")]
    ElapsedRange {
        /// Lower bound.
        min: String,
        /// Upper bound.
        max: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::IncrementRange { min: 20, max: 5 };
        assert_eq!(
            err.to_string(),
            "Invalid increment range [20, 5]: expected 1 <= min <= max <= 100"
        );
    }

    #[test]
    fn test_config_error_wraps() {
        let err: BankAssistError = ConfigError::ZeroInterval.into();
        assert!(matches!(err, BankAssistError::Config(ConfigError::ZeroInterval)));
        assert_eq!(err.to_string(), "tick_interval_ms must be greater than zero");
    }

    #[test]
    fn test_duplicate_stage_display() {
        let err = BankAssistError::DuplicateStage("auth".to_string());
        assert_eq!(err.to_string(), "Duplicate stage identifier: auth");
    }

    #[test]
    fn test_serde_error_converts() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: BankAssistError = parse.unwrap_err().into();
        assert!(matches!(err, BankAssistError::Serialization(_)));
    }
}
