//! Placeholder business data for result synthesis.

use serde::{Deserialize, Serialize};

/// Accuracy and latency figure reported for one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentScore {
    /// Agent name.
    pub name: String,
    /// Accuracy percentage.
    pub score: f64,
    /// Processing time label, e.g. `"0.3s"`.
    pub time: String,
}

impl AgentScore {
    /// Creates a new agent score.
    #[must_use]
    pub fn new(name: impl Into<String>, score: f64, time: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score,
            time: time.into(),
        }
    }
}

/// Headline business figures shown in the final report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessImpact {
    /// Customer satisfaction, e.g. `"97.8%"`.
    pub customer_satisfaction: String,
    /// Savings against manual handling, e.g. `"$847"`.
    pub cost_savings: String,
    /// Speed-up against manual handling.
    pub faster_processing: String,
    /// Regulatory compliance rate.
    pub regulatory_compliance: String,
}

impl Default for BusinessImpact {
    fn default() -> Self {
        Self {
            customer_satisfaction: "97.8%".to_string(),
            cost_savings: "$847".to_string(),
            faster_processing: "92%".to_string(),
            regulatory_compliance: "100%".to_string(),
        }
    }
}

/// Fixed customer and case details interpolated into results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseProfile {
    /// Customer full name.
    pub customer_name: String,
    /// Customer first name, used in the greeting.
    pub customer_first_name: String,
    /// Customer email address.
    pub customer_email: String,
    /// Last four digits of the account.
    pub account_last_four: String,
    /// Issue category.
    pub issue_type: String,
    /// Disputed amount, formatted.
    pub amount: String,
    /// Merchant name.
    pub merchant: String,
    /// Outcome of the case.
    pub resolution: String,
    /// Refund timeline.
    pub timeline: String,
    /// Compliance statement.
    pub compliance_status: String,
    /// Support phone number.
    pub support_phone: String,
    /// Per-agent performance figures.
    pub agent_performance: Vec<AgentScore>,
    /// Headline business figures.
    pub business_impact: BusinessImpact,
}

impl Default for CaseProfile {
    fn default() -> Self {
        Self {
            customer_name: "John Doe".to_string(),
            customer_first_name: "John".to_string(),
            customer_email: "john.doe@email.com".to_string(),
            account_last_four: "4567".to_string(),
            issue_type: "Unauthorized Transaction".to_string(),
            amount: "$487.50".to_string(),
            merchant: "MERCHANT_XYZ".to_string(),
            resolution: "Full Refund Approved".to_string(),
            timeline: "1-2 business days".to_string(),
            compliance_status: "Regulation E Compliant".to_string(),
            support_phone: "1-800-BANK-HELP".to_string(),
            agent_performance: vec![
                AgentScore::new("Intent Detection", 98.7, "0.3s"),
                AgentScore::new("Authentication", 100.0, "0.8s"),
                AgentScore::new("Transaction Analysis", 94.2, "1.1s"),
                AgentScore::new("Risk Assessment", 96.8, "0.7s"),
                AgentScore::new("Resolution Engine", 98.1, "0.3s"),
                AgentScore::new("Communication", 97.5, "0.2s"),
            ],
            business_impact: BusinessImpact::default(),
        }
    }
}

impl CaseProfile {
    /// Customer label with a masked account, e.g. `"John Doe (****4567)"`.
    #[must_use]
    pub fn masked_customer(&self) -> String {
        format!("{} (****{})", self.customer_name, self.account_last_four)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_customer() {
        assert_eq!(CaseProfile::default().masked_customer(), "John Doe (****4567)");
    }

    #[test]
    fn test_profile_deserializes_from_defaults() {
        let json = serde_json::to_string(&CaseProfile::default()).unwrap();
        let profile: CaseProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(profile.agent_performance.len(), 6);
        assert_eq!(profile.business_impact.cost_savings, "$847");
    }
}
