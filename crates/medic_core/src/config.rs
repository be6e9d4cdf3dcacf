//! Site configuration.
//!
//! Describes one deployment: where the data directory lives, where the
//! record database sits, upload policy and scheduler expectations.
//! Config file: `medic.toml` next to the deployment, or whatever path the
//! caller passes in.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::MedicError;

/// Core site identity and layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSection {
    /// Human-readable site name, used in report headings
    #[serde(default = "default_site_name")]
    pub name: String,

    /// Data directory the platform writes into.
    /// Relative paths resolve against the config file location.
    #[serde(default = "default_data_root")]
    pub data_root: PathBuf,
}

fn default_site_name() -> String {
    "site".to_string()
}

fn default_data_root() -> PathBuf {
    PathBuf::from("data")
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            name: default_site_name(),
            data_root: default_data_root(),
        }
    }
}

/// Record database location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSection {
    /// SQLite database file.
    /// Relative paths resolve against the config file location.
    #[serde(default = "default_database_path")]
    pub path: PathBuf,
}

fn default_database_path() -> PathBuf {
    PathBuf::from("site.db")
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

/// Upload policy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadsSection {
    /// Whether users may upload files at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Upload size cap in megabytes
    #[serde(default = "default_max_upload_mb")]
    pub max_upload_mb: u64,
}

fn default_true() -> bool {
    true
}

fn default_max_upload_mb() -> u64 {
    64
}

impl Default for UploadsSection {
    fn default() -> Self {
        Self {
            enabled: true,
            max_upload_mb: default_max_upload_mb(),
        }
    }
}

/// Background scheduler expectations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerSection {
    /// How often the scheduler is expected to run, in seconds
    #[serde(default = "default_expected_frequency")]
    pub expected_frequency_secs: u64,
}

fn default_expected_frequency() -> u64 {
    300
}

impl Default for SchedulerSection {
    fn default() -> Self {
        Self {
            expected_frequency_secs: default_expected_frequency(),
        }
    }
}

/// Main site configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site identity and layout
    #[serde(default)]
    pub site: SiteSection,

    /// Record database location
    #[serde(default)]
    pub database: DatabaseSection,

    /// Upload policy
    #[serde(default)]
    pub uploads: UploadsSection,

    /// Background scheduler expectations
    #[serde(default)]
    pub scheduler: SchedulerSection,

    /// Debug output toggle. Must be off on a deployed site.
    #[serde(default)]
    pub debug: bool,
}

impl SiteConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, MedicError> {
        let content = fs::read_to_string(path).map_err(|source| MedicError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| MedicError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }
}
