//! Error types for medic_core.

use std::path::PathBuf;

use thiserror::Error;

use crate::hierarchy::SnapshotError;

/// Errors surfaced by site loading and health checks.
#[derive(Debug, Error)]
pub enum MedicError {
    /// Config file could not be read
    #[error("failed to read config file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML
    #[error("failed to parse config file {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Filesystem probe failed
    #[error("i/o error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Record database access failed
    #[error("database error")]
    Database(#[from] rusqlite::Error),

    /// A category table violated the snapshot contract
    #[error("invalid category snapshot")]
    Snapshot(#[from] SnapshotError),
}
