//! Synthetic results produced when a run completes.
//!
//! Everything here is template interpolation over the case id and the
//! placeholder [`CaseProfile`]. The only derived figure is the total
//! processing time, summed from the stages' simulated elapsed seconds.

use serde::{Deserialize, Serialize};

use crate::catalog::{AgentScore, BusinessImpact, CaseProfile};
use crate::core::Stage;
use crate::utils::round_tenths;

const RESOLUTION_TEXT: &str = "Dispute case created successfully";

/// Summary handed to the completion callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionSummary {
    /// The case the run belonged to.
    pub case_id: String,
    /// Short resolution statement.
    pub resolution: String,
    /// Message shown to the customer.
    pub customer_message: String,
}

impl CompletionSummary {
    /// Builds the summary for a case.
    #[must_use]
    pub fn for_case(case_id: &str) -> Self {
        Self {
            case_id: case_id.to_string(),
            resolution: RESOLUTION_TEXT.to_string(),
            customer_message: format!("Your card dispute has been filed. Case #{case_id}"),
        }
    }
}

/// Customer email drafted by the communication stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDraft {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
}

impl EmailDraft {
    /// Renders the dispute resolution email.
    #[must_use]
    pub fn compose(case_id: &str, profile: &CaseProfile) -> Self {
        let body = format!(
            "Dear {first_name},

Thank you for contacting us regarding the unauthorized transaction on your account. After a thorough investigation, we have determined that your dispute claim is valid.

Resolution Summary:
• Transaction Amount: {amount}
• Merchant: {merchant}
• Resolution: {resolution}
• Timeline: {timeline}

The provisional credit has been applied to your account, and we have initiated an investigation with the merchant. You can expect to see the refund reflected in your account balance within the next {timeline}.

If you have any additional questions or concerns, please don't hesitate to contact us at {phone} or through your mobile banking app.

Best regards,
Customer Service Team
Case ID: {case_id}",
            first_name = profile.customer_first_name,
            amount = profile.amount,
            merchant = profile.merchant,
            resolution = profile.resolution,
            timeline = profile.timeline,
            phone = profile.support_phone,
        );

        Self {
            to: profile.customer_email.clone(),
            subject: format!("Transaction Dispute Resolution - Case #{case_id}"),
            body,
        }
    }
}

/// Final orchestration report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalReport {
    /// Case identifier.
    pub case_id: String,
    /// Customer with masked account.
    pub customer: String,
    /// Issue category.
    pub issue_type: String,
    /// Disputed amount.
    pub amount: String,
    /// Outcome.
    pub resolution: String,
    /// Total simulated processing time, formatted.
    pub processing_time: String,
    /// Compliance statement.
    pub compliance_status: String,
    /// Per-agent figures.
    pub agent_performance: Vec<AgentScore>,
    /// Headline business figures.
    pub business_impact: BusinessImpact,
}

impl FinalReport {
    /// Builds the report for a finished set of stages.
    #[must_use]
    pub fn compile(case_id: &str, profile: &CaseProfile, stages: &[Stage]) -> Self {
        let total_secs: f64 = stages.iter().filter_map(Stage::elapsed_seconds).sum();
        Self {
            case_id: case_id.to_string(),
            customer: profile.masked_customer(),
            issue_type: profile.issue_type.clone(),
            amount: profile.amount.clone(),
            resolution: profile.resolution.clone(),
            processing_time: format_processing_time(total_secs),
            compliance_status: profile.compliance_status.clone(),
            agent_performance: profile.agent_performance.clone(),
            business_impact: profile.business_impact.clone(),
        }
    }
}

/// Everything produced when a run completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestrationResult {
    /// Customer email draft.
    pub email_draft: EmailDraft,
    /// Final report.
    pub final_report: FinalReport,
}

impl OrchestrationResult {
    /// Synthesizes the result for a case.
    #[must_use]
    pub fn synthesize(case_id: &str, profile: &CaseProfile, stages: &[Stage]) -> Self {
        Self {
            email_draft: EmailDraft::compose(case_id, profile),
            final_report: FinalReport::compile(case_id, profile, stages),
        }
    }
}

fn format_processing_time(total_secs: f64) -> String {
    if total_secs >= 60.0 {
        format!("{:.1} minutes", total_secs / 60.0)
    } else {
        format!("{:.1} seconds", round_tenths(total_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StageIcon;
    use pretty_assertions::assert_eq;

    fn done_stage(id: &str, elapsed: f64) -> Stage {
        let mut stage = Stage::new(id, id, "", StageIcon::Generic);
        stage.start(10);
        stage.finish("ok".to_string(), elapsed);
        stage
    }

    #[test]
    fn test_completion_summary() {
        let summary = CompletionSummary::for_case("CS-2024-123");
        assert_eq!(summary.case_id, "CS-2024-123");
        assert_eq!(summary.resolution, "Dispute case created successfully");
        assert_eq!(
            summary.customer_message,
            "Your card dispute has been filed. Case #CS-2024-123"
        );
    }

    #[test]
    fn test_email_interpolates_case_and_profile() {
        let email = EmailDraft::compose("CS-2024-123", &CaseProfile::default());
        assert_eq!(email.to, "john.doe@email.com");
        assert_eq!(email.subject, "Transaction Dispute Resolution - Case #CS-2024-123");
        assert!(email.body.starts_with("Dear John,"));
        assert!(email.body.contains("• Transaction Amount: $487.50"));
        assert!(email.body.ends_with("Case ID: CS-2024-123"));
    }

    #[test]
    fn test_report_derives_processing_time() {
        let stages = vec![done_stage("a", 1.2), done_stage("b", 2.1), done_stage("c", 0.4)];
        let report = FinalReport::compile("CS-2024-123", &CaseProfile::default(), &stages);

        assert_eq!(report.case_id, "CS-2024-123");
        assert_eq!(report.customer, "John Doe (****4567)");
        assert_eq!(report.processing_time, "3.7 seconds");
        assert_eq!(report.agent_performance.len(), 6);
    }

    #[test]
    fn test_processing_time_minutes() {
        assert_eq!(format_processing_time(192.0), "3.2 minutes");
        assert_eq!(format_processing_time(0.0), "0.0 seconds");
    }

    #[test]
    fn test_result_serializes() {
        let result = OrchestrationResult::synthesize("CS-2024-001", &CaseProfile::default(), &[]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["final_report"]["business_impact"]["cost_savings"], "$847");
        assert_eq!(json["email_draft"]["to"], "john.doe@email.com");
    }
}
