//! Upload size cap too small to be useful.

use crate::error::MedicError;
use crate::problem::{Problem, Severity};
use crate::site::Site;

/// Below this many megabytes, ordinary course material stops fitting.
const MIN_WORKABLE_MB: u64 = 16;

pub struct UploadLimit;

impl Problem for UploadLimit {
    fn id(&self) -> &'static str {
        "upload-limit"
    }

    fn title(&self) -> String {
        "Upload size limit is very low".to_string()
    }

    fn severity(&self) -> Severity {
        Severity::Notice
    }

    fn exists(&self, site: &Site) -> Result<bool, MedicError> {
        let uploads = &site.config.uploads;
        Ok(uploads.enabled && uploads.max_upload_mb < MIN_WORKABLE_MB)
    }

    fn description(&self, site: &Site) -> Result<String, MedicError> {
        Ok(format!(
            "The upload size cap is {} MB. Presentations, recordings and \
             scanned submissions routinely exceed that, so users will see \
             upload failures for everyday files.",
            site.config.uploads.max_upload_mb
        ))
    }

    fn solution(&self, site: &Site) -> Result<String, MedicError> {
        Ok(format!(
            "Raise max_upload_mb in the [uploads] section of {} to at least \
             {MIN_WORKABLE_MB} MB, and make sure any front-end proxy allows \
             request bodies of the same size.",
            site.config_path.display()
        ))
    }
}
