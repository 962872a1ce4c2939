//! Terminal rendering of runs and results.

use bankassist::prelude::*;
use colored::{ColoredString, Colorize};
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

/// Glyph shown for a symbolic stage icon.
pub fn icon_glyph(icon: StageIcon) -> &'static str {
    match icon {
        StageIcon::Intake => "📞",
        StageIcon::Intent => "🧠",
        StageIcon::Auth => "🔐",
        StageIcon::Entitlement => "👤",
        StageIcon::Knowledge => "📚",
        StageIcon::Resolution => "⚙️",
        StageIcon::Compliance => "🛡️",
        StageIcon::Communication => "✉️",
        StageIcon::Generic => "•",
    }
}

fn badge(state: StageState) -> ColoredString {
    let label = format!("{:<11}", state.to_string());
    match state {
        StageState::Pending => label.dimmed(),
        StageState::InProgress => label.yellow().bold(),
        StageState::Done => label.green(),
        StageState::Failed => label.red().bold(),
    }
}

/// Fixed-width progress bar, e.g. `[#####.....]`.
pub fn progress_bar(progress: u8, width: usize) -> String {
    let filled = (usize::from(progress.min(100)) * width) / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

fn stage_line(stage: &Stage) -> String {
    let mut line = format!(
        "{} {:<32} {} {} {:>3}%",
        icon_glyph(stage.icon()),
        stage.display_name(),
        badge(stage.state()),
        progress_bar(stage.progress(), BAR_WIDTH),
        stage.progress()
    );
    if let Some(elapsed) = stage.elapsed_seconds() {
        let _ = write!(line, " {}", format!("({elapsed:.1}s)").dimmed());
    }
    if let Some(output) = stage.output() {
        let _ = write!(line, "\n     {}", output.italic());
    }
    line
}

/// Full board for one snapshot of a run.
pub fn board(run: &PipelineRun) -> String {
    let metrics = run.metrics();
    let mut out = format!(
        "{} {}\n\n",
        "Case".bold(),
        run.case_id().cyan().bold()
    );
    for stage in run.stages() {
        out.push_str(&stage_line(stage));
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "\n{}/{} complete, {} in progress, {} pending ({}%)",
        metrics.completed, metrics.total, metrics.in_progress, metrics.pending, metrics.percent_complete
    );
    out
}

/// Completion summary banner.
pub fn summary(summary: &CompletionSummary) -> String {
    format!(
        "{} {}\n{}",
        "✔".green().bold(),
        summary.resolution.green().bold(),
        summary.customer_message
    )
}

/// Email draft and final report.
pub fn result(result: &OrchestrationResult) -> String {
    let email = &result.email_draft;
    let report = &result.final_report;
    let mut out = String::new();

    let _ = writeln!(out, "\n{}", "Email draft".bold().underline());
    let _ = writeln!(out, "To:      {}", email.to);
    let _ = writeln!(out, "Subject: {}\n", email.subject);
    let _ = writeln!(out, "{}", email.body);

    let _ = writeln!(out, "\n{}", "Final report".bold().underline());
    for (label, value) in [
        ("Case", &report.case_id),
        ("Customer", &report.customer),
        ("Issue", &report.issue_type),
        ("Amount", &report.amount),
        ("Resolution", &report.resolution),
        ("Processing time", &report.processing_time),
        ("Compliance", &report.compliance_status),
    ] {
        let _ = writeln!(out, "{:<16} {value}", format!("{label}:"));
    }

    let _ = writeln!(out, "\n{}", "Agent performance".bold());
    for agent in &report.agent_performance {
        let _ = writeln!(out, "  {:<28} {:>5.1}%  {}", agent.name, agent.score, agent.time);
    }

    let impact = &report.business_impact;
    let _ = writeln!(out, "\n{}", "Business impact".bold());
    let _ = writeln!(out, "  Customer satisfaction  {}", impact.customer_satisfaction);
    let _ = writeln!(out, "  Cost savings           {}", impact.cost_savings);
    let _ = writeln!(out, "  Faster processing      {}", impact.faster_processing);
    let _ = write!(out, "  Regulatory compliance  {}", impact.regulatory_compliance);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn finished_run() -> PipelineRun {
        let mut stepper = PipelineStepper::seeded(
            "CS-2024-001",
            &StageCatalog::banking(),
            StepperConfig::default(),
            7,
        )
        .unwrap();
        stepper.run_to_completion(usize::MAX);
        stepper.into_run()
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 10), "[..........]");
        assert_eq!(progress_bar(55, 10), "[#####.....]");
        assert_eq!(progress_bar(100, 10), "[##########]");
        assert_eq!(progress_bar(200, 4), "[####]");
    }

    #[test]
    fn test_generic_icon_glyph() {
        assert_eq!(icon_glyph(StageIcon::Generic), "•");
        assert_ne!(icon_glyph(StageIcon::Intake), icon_glyph(StageIcon::Compliance));
    }

    #[test]
    fn test_board_lists_every_stage() {
        colored::control::set_override(false);
        let run = PipelineStepper::seeded(
            "CS-2024-001",
            &StageCatalog::banking(),
            StepperConfig::default(),
            1,
        )
        .unwrap()
        .into_run();

        let board = board(&run);
        assert!(board.starts_with("Case CS-2024-001"));
        for stage in run.stages() {
            assert!(board.contains(stage.display_name()));
        }
        assert!(board.contains("0/8 complete, 1 in progress, 7 pending (0%)"));
    }

    #[test]
    fn test_board_shows_outputs_when_done() {
        colored::control::set_override(false);
        let run = finished_run();
        let board = board(&run);
        for stage in run.stages() {
            assert!(board.contains(stage.output().unwrap()));
        }
        assert!(board.contains("8/8 complete"));
    }

    #[test]
    fn test_result_includes_email_and_report() {
        colored::control::set_override(false);
        let run = finished_run();
        let text = result(run.result().unwrap());

        assert!(text.contains("Subject: Transaction Dispute Resolution - Case #CS-2024-001"));
        assert!(text.contains("Customer:        John Doe (****4567)"));
        assert!(text.contains("Regulatory compliance  100%"));
    }
}
