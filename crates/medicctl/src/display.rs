//! Terminal rendering for health reports.
//!
//! All functions render to a `String`; the command layer decides where it
//! goes. JSON output bypasses this module entirely.

use owo_colors::OwoColorize;

use medic_core::problem::{Problem, Severity};
use medic_core::report::{HealthReport, SolutionView};

/// Severity label, colored for the terminal.
fn severity_tag(severity: Severity) -> String {
    let label = severity.as_str().to_uppercase();
    match severity {
        Severity::Critical => label.red().bold().to_string(),
        Severity::Significant => label.yellow().bold().to_string(),
        Severity::Annoyance => label.cyan().bold().to_string(),
        Severity::Notice => label.dimmed().to_string(),
    }
}

fn push_indented(out: &mut String, text: &str) {
    for line in text.lines() {
        out.push_str("    ");
        out.push_str(line);
        out.push('\n');
    }
}

/// Render the severity-grouped report.
pub fn render_health_report(report: &HealthReport) -> String {
    let mut out = format!("Health report for {}\n\n", report.site.bold());

    if report.is_clean() {
        out.push_str(&format!("{}\n", "No problems found.".green()));
        return out;
    }

    for severity in Severity::ALL {
        let group: Vec<_> = report.by_severity(severity).collect();
        if group.is_empty() {
            continue;
        }
        out.push_str(&format!(
            "{} ({} problem(s))\n",
            severity_tag(severity),
            group.len()
        ));
        for problem in group {
            out.push_str(&format!("  [{}] {}\n", problem.id, problem.title.bold()));
            push_indented(&mut out, &problem.description);
            out.push('\n');
        }
    }

    if !report.failures.is_empty() {
        out.push_str(&format!("{}\n", "Checks that could not run:".red()));
        for failure in &report.failures {
            out.push_str(&format!("  [{}] {}\n", failure.id, failure.error));
        }
        out.push('\n');
    }

    out.push_str("Run `medicctl solution <id>` for a suggested fix.\n");
    out
}

/// Render the drill-down view for one check.
pub fn render_solution_view(view: &SolutionView) -> String {
    let mut out = format!(
        "{} [{}] {}\n\n",
        severity_tag(view.severity),
        view.id,
        view.title.bold()
    );
    push_indented(&mut out, &view.description);
    out.push('\n');
    out.push_str(&format!("{}\n", "Suggested fix:".bold()));
    push_indented(&mut out, &view.solution);
    if !view.links.is_empty() {
        out.push('\n');
        out.push_str("Further reading:\n");
        for link in &view.links {
            out.push_str(&format!("  {}: {}\n", link.label, link.url));
        }
    }
    out
}

/// Render the check catalog as a table.
pub fn render_catalog(checks: &[Box<dyn Problem>]) -> String {
    let mut out = String::new();
    for check in checks {
        out.push_str(&format!(
            "{:<26} {:<12} {}\n",
            check.id(),
            check.severity().as_str(),
            check.title()
        ));
    }
    out
}
