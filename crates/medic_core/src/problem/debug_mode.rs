//! Debug output enabled on a deployed site.

use crate::error::MedicError;
use crate::problem::{Problem, Severity};
use crate::site::Site;

pub struct DebugMode;

impl Problem for DebugMode {
    fn id(&self) -> &'static str {
        "debug-mode"
    }

    fn title(&self) -> String {
        "Debug output is enabled".to_string()
    }

    fn severity(&self) -> Severity {
        Severity::Critical
    }

    fn exists(&self, site: &Site) -> Result<bool, MedicError> {
        Ok(site.config.debug)
    }

    fn description(&self, site: &Site) -> Result<String, MedicError> {
        Ok(format!(
            "The config file {} sets debug = true. With debug output on, every \
             visitor can see stack traces, file paths and query details when \
             something goes wrong. That information makes breaking into the site \
             much easier and must never be exposed on a deployed site.",
            site.config_path.display()
        ))
    }

    fn solution(&self, site: &Site) -> Result<String, MedicError> {
        Ok(format!(
            "Edit {} and set debug = false, then reload the application server. \
             Enable debug output only on a development copy of the site.",
            site.config_path.display()
        ))
    }
}
