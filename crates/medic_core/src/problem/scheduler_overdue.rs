//! Background scheduler has not run recently.
//!
//! The platform records the start of every scheduler pass under the
//! `lastcronstart` key of its `site_config` table. A stale or missing
//! stamp means queued jobs (mail, cleanup, cache rebuilds) are not
//! happening.

use chrono::Utc;

use crate::db;
use crate::error::MedicError;
use crate::problem::{Link, Problem, Severity};
use crate::site::Site;

/// Slack added on top of the expected frequency before complaining.
const GRACE_SECS: i64 = 60;

pub struct SchedulerOverdue;

impl SchedulerOverdue {
    /// Seconds since the last recorded scheduler start, or `None` if it
    /// never ran.
    fn seconds_since_last_run(&self, site: &Site) -> Result<Option<i64>, MedicError> {
        let last = db::site_config_value(site.db(), "lastcronstart")?
            .and_then(|value| value.parse::<i64>().ok());
        Ok(last.map(|stamp| Utc::now().timestamp() - stamp))
    }
}

impl Problem for SchedulerOverdue {
    fn id(&self) -> &'static str {
        "scheduler-overdue"
    }

    fn title(&self) -> String {
        "Background scheduler is not running".to_string()
    }

    fn severity(&self) -> Severity {
        Severity::Significant
    }

    fn exists(&self, site: &Site) -> Result<bool, MedicError> {
        let expected = site.config.scheduler.expected_frequency_secs as i64;
        match self.seconds_since_last_run(site)? {
            None => Ok(true),
            Some(delta) => Ok(delta > expected + GRACE_SECS),
        }
    }

    fn description(&self, site: &Site) -> Result<String, MedicError> {
        let when = match self.seconds_since_last_run(site)? {
            None => "has never run".to_string(),
            Some(delta) => format!("last ran {} minutes ago", delta / 60),
        };
        Ok(format!(
            "The background scheduler {when}, but the site expects it every {} \
             seconds. While it is stalled no mail goes out, sessions are not \
             cleaned up and caches grow stale.",
            site.config.scheduler.expected_frequency_secs
        ))
    }

    fn solution(&self, _site: &Site) -> Result<String, MedicError> {
        Ok("Install a systemd timer or cron entry that invokes the platform's \
            scheduler at the configured frequency, and check the scheduler log \
            for jobs that crash before the run is recorded."
            .to_string())
    }

    fn links(&self) -> Vec<Link> {
        vec![Link::new(
            "Scheduler setup",
            "https://github.com/medic-team/medic/wiki/Scheduler",
        )]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::fixture_site;

    fn record_last_run(site: &Site, stamp: i64) {
        site.db()
            .execute(
                "INSERT INTO site_config (name, value) VALUES ('lastcronstart', ?1)",
                [stamp.to_string()],
            )
            .unwrap();
    }

    #[test]
    fn test_never_ran_is_detected() {
        let site = fixture_site();
        assert!(SchedulerOverdue.exists(&site).unwrap());
        assert!(SchedulerOverdue
            .description(&site)
            .unwrap()
            .contains("has never run"));
    }

    #[test]
    fn test_recent_run_is_fine() {
        let site = fixture_site();
        record_last_run(&site, Utc::now().timestamp());
        assert!(!SchedulerOverdue.exists(&site).unwrap());
    }

    #[test]
    fn test_stale_run_is_detected() {
        let site = fixture_site();
        record_last_run(&site, Utc::now().timestamp() - 86_400);
        assert!(SchedulerOverdue.exists(&site).unwrap());
    }
}
