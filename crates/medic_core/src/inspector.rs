//! Check dispatcher.
//!
//! Runs the catalog against one site and assembles the report. A check
//! that errors (unreadable database, broken table) is recorded as a
//! failure instead of aborting the whole run.

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::MedicError;
use crate::problem::Problem;
use crate::report::{CheckFailure, HealthReport, ProblemReport, SolutionView};
use crate::site::Site;

/// Run every check and group what was found by severity.
pub fn run_checks(site: &Site, catalog: &[Box<dyn Problem>]) -> HealthReport {
    let mut problems = Vec::new();
    let mut failures = Vec::new();

    for check in catalog {
        debug!(id = check.id(), "running check");
        match check.exists(site) {
            Ok(false) => {}
            Ok(true) => match check.description(site) {
                Ok(description) => problems.push(ProblemReport {
                    id: check.id().to_string(),
                    severity: check.severity(),
                    title: check.title(),
                    description,
                }),
                Err(err) => {
                    warn!(id = check.id(), error = %err, "check failed to describe its finding");
                    failures.push(CheckFailure {
                        id: check.id().to_string(),
                        error: err.to_string(),
                    });
                }
            },
            Err(err) => {
                warn!(id = check.id(), error = %err, "check failed to run");
                failures.push(CheckFailure {
                    id: check.id().to_string(),
                    error: err.to_string(),
                });
            }
        }
    }

    // Severity derives Ord most-severe-first; ties keep catalog order.
    problems.sort_by_key(|p| p.severity);

    HealthReport {
        site: site.config.site.name.clone(),
        generated_at: Utc::now(),
        problems,
        failures,
    }
}

/// Build the drill-down view for one check, or `None` for an unknown id.
pub fn solution_view(
    site: &Site,
    catalog: &[Box<dyn Problem>],
    id: &str,
) -> Result<Option<SolutionView>, MedicError> {
    for check in catalog {
        if check.id() == id {
            return Ok(Some(SolutionView {
                id: check.id().to_string(),
                severity: check.severity(),
                title: check.title(),
                description: check.description(site)?,
                solution: check.solution(site)?,
                links: check.links(),
            }));
        }
    }
    Ok(None)
}
