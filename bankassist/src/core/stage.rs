//! The stage record.

use serde::{Deserialize, Serialize};

use super::{StageIcon, StageState};

/// One step of a simulated pipeline run.
///
/// Stages are only mutated by the stepper that owns their run. Everyone else
/// sees them through shared references and getters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    identifier: String,
    display_name: String,
    description: String,
    icon: StageIcon,
    state: StageState,
    progress: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    elapsed_seconds: Option<f64>,
}

impl Stage {
    /// Creates a pending stage.
    #[must_use]
    pub fn new(
        identifier: impl Into<String>,
        display_name: impl Into<String>,
        description: impl Into<String>,
        icon: StageIcon,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            display_name: display_name.into(),
            description: description.into(),
            icon,
            state: StageState::Pending,
            progress: 0,
            output: None,
            elapsed_seconds: None,
        }
    }

    /// Stable short key, e.g. `"auth"`.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Human-readable name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// One-line description of what the stage does.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Symbolic icon.
    #[must_use]
    pub fn icon(&self) -> StageIcon {
        self.icon
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> StageState {
        self.state
    }

    /// Progress in `[0, 100]`.
    #[must_use]
    pub fn progress(&self) -> u8 {
        self.progress
    }

    /// Canned output, present once the stage is done.
    #[must_use]
    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    /// Simulated processing time, present once the stage is done.
    #[must_use]
    pub fn elapsed_seconds(&self) -> Option<f64> {
        self.elapsed_seconds
    }

    /// Moves a pending stage to `InProgress`.
    pub(crate) fn start(&mut self, initial_progress: u8) {
        self.state = StageState::InProgress;
        self.progress = initial_progress.min(100);
    }

    /// Adds `increment` to the progress, clamped to 100. Returns the new value.
    pub(crate) fn advance(&mut self, increment: u8) -> u8 {
        self.progress = self.progress.saturating_add(increment).min(100);
        self.progress
    }

    /// Marks the stage done.
    pub(crate) fn finish(&mut self, output: String, elapsed_seconds: f64) {
        self.state = StageState::Done;
        self.progress = 100;
        self.output = Some(output);
        self.elapsed_seconds = Some(elapsed_seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage() -> Stage {
        Stage::new("auth", "Authentication & KYC Agent", "Validating customer identity", StageIcon::Auth)
    }

    #[test]
    fn test_new_stage_is_pending() {
        let stage = stage();
        assert_eq!(stage.state(), StageState::Pending);
        assert_eq!(stage.progress(), 0);
        assert!(stage.output().is_none());
        assert!(stage.elapsed_seconds().is_none());
    }

    #[test]
    fn test_advance_clamps() {
        let mut stage = stage();
        stage.start(95);
        assert_eq!(stage.advance(15), 100);
        assert_eq!(stage.advance(200), 100);
    }

    #[test]
    fn test_finish() {
        let mut stage = stage();
        stage.start(10);
        stage.finish("Identity verified".to_string(), 1.5);

        assert_eq!(stage.state(), StageState::Done);
        assert_eq!(stage.progress(), 100);
        assert_eq!(stage.output(), Some("Identity verified"));
        assert_eq!(stage.elapsed_seconds(), Some(1.5));
    }

    #[test]
    fn test_serialize_skips_empty_output() {
        let json = serde_json::to_value(stage()).unwrap();
        assert_eq!(json["state"], "pending");
        assert!(json.get("output").is_none());
    }
}
