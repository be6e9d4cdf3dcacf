//! Data directory exists and is writable.

use std::fs;

use crate::error::MedicError;
use crate::problem::{Problem, Severity};
use crate::site::Site;

pub struct DataRoot;

impl Problem for DataRoot {
    fn id(&self) -> &'static str {
        "data-root"
    }

    fn title(&self) -> String {
        "Data directory is missing or not writable".to_string()
    }

    fn severity(&self) -> Severity {
        Severity::Significant
    }

    fn exists(&self, site: &Site) -> Result<bool, MedicError> {
        let root = &site.data_root;
        if !root.is_dir() {
            return Ok(true);
        }
        let readonly = fs::metadata(root)
            .map(|m| m.permissions().readonly())
            .unwrap_or(true);
        Ok(readonly)
    }

    fn description(&self, site: &Site) -> Result<String, MedicError> {
        Ok(format!(
            "The config file says the data directory is {}, but that directory \
             either does not exist or cannot be written to. Until this is fixed \
             users cannot upload files and background jobs cannot store their \
             working data.",
            site.data_root.display()
        ))
    }

    fn solution(&self, site: &Site) -> Result<String, MedicError> {
        Ok(format!(
            "Make sure {} exists, then give the application server's user write \
             permission on it, for example:\n\n\
             mkdir -p {path}\n\
             chown -R www-data:www-data {path}",
            site.data_root.display(),
            path = site.data_root.display()
        ))
    }
}
