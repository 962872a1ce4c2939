//! Stage definitions.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::{Stage, StageIcon};
use crate::errors::{BankAssistError, Result};

/// Static description of a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageDefinition {
    /// Stable short key.
    pub identifier: String,
    /// Human-readable name.
    pub display_name: String,
    /// What the stage does.
    pub description: String,
    /// Symbolic icon.
    #[serde(default)]
    pub icon: StageIcon,
}

impl StageDefinition {
    /// Creates a new stage definition.
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
        }
    }

    /// Creates a pending [`Stage`] from this definition.
    #[must_use]
    pub fn to_stage(&self) -> Stage {
        Stage::new(
            self.identifier.clone(),
            self.display_name.clone(),
            self.description.clone(),
            self.icon,
        )
    }
}

/// An ordered list of stage definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCatalog {
    stages: Vec<StageDefinition>,
}

impl StageCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The eight-agent customer service pipeline.
    #[must_use]
    pub fn banking() -> Self {
        Self::new()
            .with_stage(StageDefinition::new(
                "intake",
                "Channel Intake Agent",
                "Capturing structured interaction data",
                StageIcon::Intake,
            ))
            .with_stage(StageDefinition::new(
                "intent",
                "Intent Detection Agent",
                "Classifying customer query intent",
                StageIcon::Intent,
            ))
            .with_stage(StageDefinition::new(
                "auth",
                "Authentication & KYC Agent",
                "Validating customer identity",
                StageIcon::Auth,
            ))
            .with_stage(StageDefinition::new(
                "entitlement",
                "Profile & Entitlement Agent",
                "Checking customer permissions",
                StageIcon::Entitlement,
            ))
            .with_stage(StageDefinition::new(
                "knowledge",
                "Knowledge Retrieval Agent",
                "Fetching relevant policies and procedures",
                StageIcon::Knowledge,
            ))
            .with_stage(StageDefinition::new(
                "resolution",
                "Transaction Resolution Agent",
                "Processing dispute and creating case",
                StageIcon::Resolution,
            ))
            .with_stage(StageDefinition::new(
                "compliance",
                "Compliance & Risk Agent",
                "Ensuring regulatory compliance",
                StageIcon::Compliance,
            ))
            .with_stage(StageDefinition::new(
                "communication",
                "Communication Agent",
                "Drafting customer response",
                StageIcon::Communication,
            ))
    }

    /// A catalog of `count` generic stages named `stage_0`, `stage_1`, ...
    #[must_use]
    pub fn linear(count: usize) -> Self {
        let stages = (0..count)
            .map(|i| {
                StageDefinition::new(
                    format!("stage_{i}"),
                    format!("Stage {i}"),
                    "Generic processing step",
                    StageIcon::Generic,
                )
            })
            .collect();
        Self { stages }
    }

    /// Appends a stage.
    #[must_use]
    pub fn with_stage(mut self, definition: StageDefinition) -> Self {
        self.stages.push(definition);
        self
    }

    /// Returns the definitions in order.
    #[must_use]
    pub fn stages(&self) -> &[StageDefinition] {
        &self.stages
    }

    /// Returns the number of stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns true if the catalog has no stages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Looks up a definition by identifier.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&StageDefinition> {
        self.stages.iter().find(|s| s.identifier == identifier)
    }

    /// Checks the catalog can back a run: non-empty, unique identifiers.
    pub fn validate(&self) -> Result<()> {
        if self.stages.is_empty() {
            return Err(BankAssistError::EmptyPipeline);
        }
        let mut seen = HashSet::new();
        for stage in &self.stages {
            if !seen.insert(stage.identifier.as_str()) {
                return Err(BankAssistError::DuplicateStage(stage.identifier.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banking_catalog() {
        let catalog = StageCatalog::banking();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.stages()[0].identifier, "intake");
        assert_eq!(catalog.stages()[7].identifier, "communication");
        assert_eq!(catalog.get("auth").map(|s| s.icon), Some(StageIcon::Auth));
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn test_linear_catalog() {
        let catalog = StageCatalog::linear(3);
        let ids: Vec<_> = catalog.stages().iter().map(|s| s.identifier.as_str()).collect();
        assert_eq!(ids, vec!["stage_0", "stage_1", "stage_2"]);
    }

    #[test]
    fn test_validate_empty() {
        assert!(matches!(
            StageCatalog::new().validate(),
            Err(BankAssistError::EmptyPipeline)
        ));
    }

    #[test]
    fn test_validate_duplicate() {
        let catalog = StageCatalog::linear(2).with_stage(StageDefinition::new(
            "stage_1",
            "Again",
            "",
            StageIcon::Generic,
        ));
        match catalog.validate() {
            Err(BankAssistError::DuplicateStage(id)) => assert_eq!(id, "stage_1"),
            other => panic!("expected duplicate error, got {other:?}"),
        }
    }

    #[test]
    fn test_to_stage() {
        let stage = StageCatalog::banking().stages()[2].to_stage();
        assert_eq!(stage.identifier(), "auth");
        assert_eq!(stage.display_name(), "Authentication & KYC Agent");
    }
}
