//! File uploads switched off.

use crate::error::MedicError;
use crate::problem::{Problem, Severity};
use crate::site::Site;

pub struct UploadsDisabled;

impl Problem for UploadsDisabled {
    fn id(&self) -> &'static str {
        "uploads-disabled"
    }

    fn title(&self) -> String {
        "File uploads are disabled".to_string()
    }

    fn severity(&self) -> Severity {
        Severity::Significant
    }

    fn exists(&self, site: &Site) -> Result<bool, MedicError> {
        Ok(!site.config.uploads.enabled)
    }

    fn description(&self, _site: &Site) -> Result<String, MedicError> {
        Ok("Uploads are switched off in the site configuration. Users cannot \
            submit assignments, attach files or set profile pictures until \
            uploads are enabled again."
            .to_string())
    }

    fn solution(&self, site: &Site) -> Result<String, MedicError> {
        Ok(format!(
            "Edit {} and set enabled = true in the [uploads] section, then \
             reload the application server.",
            site.config_path.display()
        ))
    }
}
