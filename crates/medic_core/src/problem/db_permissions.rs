//! Record database readable by every local user.

use std::fs;
use std::os::unix::fs::PermissionsExt;

use crate::error::MedicError;
use crate::problem::{Problem, Severity};
use crate::site::Site;

pub struct DbPermissions;

impl Problem for DbPermissions {
    fn id(&self) -> &'static str {
        "db-permissions"
    }

    fn title(&self) -> String {
        "Record database is accessible to other local users".to_string()
    }

    fn severity(&self) -> Severity {
        Severity::Critical
    }

    fn exists(&self, site: &Site) -> Result<bool, MedicError> {
        let metadata = fs::metadata(&site.db_path).map_err(|source| MedicError::Io {
            path: site.db_path.clone(),
            source,
        })?;
        // World read or write bits on the database file.
        Ok(metadata.permissions().mode() & 0o006 != 0)
    }

    fn description(&self, site: &Site) -> Result<String, MedicError> {
        Ok(format!(
            "The database file {} is readable or writable by every local user. \
             It holds personal data and password hashes, so any other account \
             on this machine can copy or tamper with it.",
            site.db_path.display()
        ))
    }

    fn solution(&self, site: &Site) -> Result<String, MedicError> {
        Ok(format!(
            "Restrict the file to the application server's user:\n\n\
             chown www-data:www-data {path}\n\
             chmod 600 {path}",
            path = site.db_path.display()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use rusqlite::Connection;

    use crate::config::SiteConfig;
    use crate::site::Site;
    use crate::testutil;

    fn site_with_db_file(mode: u32) -> (tempfile::TempDir, Site) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("site.db");
        fs::write(&db_path, b"").unwrap();
        fs::set_permissions(&db_path, fs::Permissions::from_mode(mode)).unwrap();

        let conn = Connection::open_in_memory().unwrap();
        testutil::schema(&conn);
        let site = Site::from_parts(
            SiteConfig::default(),
            PathBuf::from("medic.toml"),
            PathBuf::from("data"),
            db_path,
            conn,
        );
        (dir, site)
    }

    #[test]
    fn test_world_readable_is_detected() {
        let (_dir, site) = site_with_db_file(0o644);
        assert!(DbPermissions.exists(&site).unwrap());
    }

    #[test]
    fn test_owner_only_is_fine() {
        let (_dir, site) = site_with_db_file(0o600);
        assert!(!DbPermissions.exists(&site).unwrap());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let (_dir, site) = site_with_db_file(0o600);
        fs::remove_file(&site.db_path).unwrap();
        assert!(matches!(
            DbPermissions.exists(&site),
            Err(MedicError::Io { .. })
        ));
    }
}
