//! Report model for one inspector run.
//!
//! Plain serde data, shared between the JSON output and the terminal
//! renderer in medicctl.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::problem::{Link, Severity};

/// One detected problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemReport {
    /// Stable check id, used for the solution drill-down
    pub id: String,
    /// How bad it is
    pub severity: Severity,
    /// Short headline
    pub title: String,
    /// What was found, with offending records listed where applicable
    pub description: String,
}

/// A check that could not run to completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckFailure {
    /// Check id
    pub id: String,
    /// Why it failed
    pub error: String,
}

/// Result of running the full catalog against one site.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Site name from the config
    pub site: String,
    /// When the run happened
    pub generated_at: DateTime<Utc>,
    /// Detected problems, most severe first
    pub problems: Vec<ProblemReport>,
    /// Checks that errored instead of answering
    pub failures: Vec<CheckFailure>,
}

impl HealthReport {
    /// No problems and no failed checks.
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty() && self.failures.is_empty()
    }

    /// Whether anything critical was found.
    pub fn has_critical(&self) -> bool {
        self.problems
            .iter()
            .any(|p| p.severity == Severity::Critical)
    }

    /// Problems of one severity, in report order.
    pub fn by_severity(&self, severity: Severity) -> impl Iterator<Item = &ProblemReport> {
        self.problems.iter().filter(move |p| p.severity == severity)
    }
}

/// Drill-down view for a single check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolutionView {
    /// Check id
    pub id: String,
    /// How bad it is
    pub severity: Severity,
    /// Short headline
    pub title: String,
    /// What was found
    pub description: String,
    /// Suggested fix, including repair SQL where applicable
    pub solution: String,
    /// Further reading
    pub links: Vec<Link>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_with(severities: &[Severity]) -> HealthReport {
        HealthReport {
            site: "test".to_string(),
            generated_at: Utc::now(),
            problems: severities
                .iter()
                .enumerate()
                .map(|(i, &severity)| ProblemReport {
                    id: format!("check-{i}"),
                    severity,
                    title: format!("problem {i}"),
                    description: String::new(),
                })
                .collect(),
            failures: vec![],
        }
    }

    #[test]
    fn test_clean_report() {
        let report = report_with(&[]);
        assert!(report.is_clean());
        assert!(!report.has_critical());
    }

    #[test]
    fn test_has_critical() {
        let report = report_with(&[Severity::Notice, Severity::Critical]);
        assert!(!report.is_clean());
        assert!(report.has_critical());
    }

    #[test]
    fn test_by_severity_filters() {
        let report = report_with(&[Severity::Notice, Severity::Critical, Severity::Notice]);
        assert_eq!(report.by_severity(Severity::Notice).count(), 2);
        assert_eq!(report.by_severity(Severity::Annoyance).count(), 0);
    }
}
