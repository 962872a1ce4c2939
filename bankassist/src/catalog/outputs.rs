//! Canned stage outputs keyed by stage identifier.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Output used for identifiers missing from the table.
pub const GENERIC_OUTPUT: &str = "Processing complete";

/// A table of canned output strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CannedOutputs {
    outputs: HashMap<String, String>,
    fallback: String,
}

impl Default for CannedOutputs {
    fn default() -> Self {
        Self::empty()
            .with_output("intake", "Interaction packet created - Web portal submission")
            .with_output(
                "intent",
                "Intent: Card Dispute | Confidence: 95% | Product: Credit Card | Urgency: High",
            )
            .with_output("auth", "Identity verified ✓ | KYC status: Active | Risk score: Low")
            .with_output(
                "entitlement",
                "Dispute privileges: Active ✓ | Channel permissions: Web/Mobile ✓",
            )
            .with_output(
                "knowledge",
                "Retrieved: Reg E dispute procedures | Timeline: 10 business days | Required docs: Transaction details",
            )
            .with_output(
                "resolution",
                "Dispute case CD-2024-001 created | Transaction flagged | Provisional credit approved",
            )
            .with_output(
                "compliance",
                "Reg E compliant ✓ | Dispute timeline met ✓ | Customer notification required ✓",
            )
            .with_output(
                "communication",
                "Draft message prepared for customer review and approval",
            )
    }
}

impl CannedOutputs {
    /// Creates a table with no entries and the generic fallback.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            outputs: HashMap::new(),
            fallback: GENERIC_OUTPUT.to_string(),
        }
    }

    /// Adds or replaces the output for a stage.
    #[must_use]
    pub fn with_output(mut self, identifier: impl Into<String>, output: impl Into<String>) -> Self {
        self.outputs.insert(identifier.into(), output.into());
        self
    }

    /// Replaces the fallback. Empty strings are ignored so a done stage
    /// always has text.
    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        let fallback = fallback.into();
        if !fallback.trim().is_empty() {
            self.fallback = fallback;
        }
        self
    }

    /// Returns the canned output for `identifier`, or the fallback.
    ///
    /// Never blank: a blank entry or fallback (possible through
    /// deserialization) resolves to [`GENERIC_OUTPUT`].
    #[must_use]
    pub fn output_for(&self, identifier: &str) -> &str {
        let non_blank = |s: &&str| !s.trim().is_empty();
        self.outputs
            .get(identifier)
            .map(String::as_str)
            .filter(non_blank)
            .or_else(|| Some(self.fallback.as_str()).filter(non_blank))
            .unwrap_or(GENERIC_OUTPUT)
    }

    /// Returns true if `identifier` has a dedicated entry.
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.outputs.contains_key(identifier)
    }
}
