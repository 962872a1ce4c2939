//! Stage state enum.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The lifecycle state of a stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageState {
    /// Waiting for the previous stage to finish.
    #[default]
    Pending,
    /// Currently advancing. At most one stage of a run is in this state.
    InProgress,
    /// Finished with an output.
    Done,
    /// Reserved. Nothing in the simulation produces it.
    Failed,
}

impl fmt::Display for StageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Done => write!(f, "done"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl StageState {
    /// Returns true if the stage will never change again.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Returns true if the stage is currently advancing.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::InProgress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_state_display() {
        assert_eq!(StageState::Pending.to_string(), "pending");
        assert_eq!(StageState::InProgress.to_string(), "in_progress");
        assert_eq!(StageState::Done.to_string(), "done");
        assert_eq!(StageState::Failed.to_string(), "failed");
    }

    #[test]
    fn test_stage_state_is_terminal() {
        assert!(StageState::Done.is_terminal());
        assert!(StageState::Failed.is_terminal());
        assert!(!StageState::Pending.is_terminal());
        assert!(!StageState::InProgress.is_terminal());
    }

    #[test]
    fn test_stage_state_serialize() {
        let json = serde_json::to_string(&StageState::InProgress).unwrap();
        assert_eq!(json, r#""in_progress""#);

        let state: StageState = serde_json::from_str(r#""done""#).unwrap();
        assert_eq!(state, StageState::Done);
    }
}
