//! Loaded site context.
//!
//! `Site` bundles everything a check may look at: the parsed config, the
//! resolved filesystem paths and an open read-only database handle. Checks
//! receive `&Site` and nothing else, so there is no hidden environment to
//! reach into.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use crate::config::SiteConfig;
use crate::db;
use crate::error::MedicError;

/// One deployment, loaded and ready to be checked.
pub struct Site {
    /// Parsed configuration
    pub config: SiteConfig,
    /// Where the config was read from
    pub config_path: PathBuf,
    /// Resolved data directory
    pub data_root: PathBuf,
    /// Resolved database file
    pub db_path: PathBuf,
    db: Connection,
}

impl Site {
    /// Load a site from its config file.
    ///
    /// Relative `data_root` and database paths resolve against the config
    /// file's directory.
    pub fn open(config_path: &Path) -> Result<Self, MedicError> {
        let config = SiteConfig::load(config_path)?;
        let base = config_path.parent().unwrap_or_else(|| Path::new("."));
        let data_root = resolve(base, &config.site.data_root);
        let db_path = resolve(base, &config.database.path);
        let db = db::open(&db_path)?;

        Ok(Self {
            config,
            config_path: config_path.to_path_buf(),
            data_root,
            db_path,
            db,
        })
    }

    /// Assemble a site from already-loaded parts.
    ///
    /// Used by tests and by embedders that manage their own connection.
    pub fn from_parts(
        config: SiteConfig,
        config_path: PathBuf,
        data_root: PathBuf,
        db_path: PathBuf,
        db: Connection,
    ) -> Self {
        Self {
            config,
            config_path,
            data_root,
            db_path,
            db,
        }
    }

    /// Record database handle.
    pub fn db(&self) -> &Connection {
        &self.db
    }
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
