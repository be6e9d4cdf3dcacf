//! Shared fixtures for unit tests.

use std::path::PathBuf;

use rusqlite::Connection;

use crate::config::SiteConfig;
use crate::site::Site;

/// Create the platform schema on a connection.
pub fn schema(conn: &Connection) {
    conn.execute_batch(
        "CREATE TABLE site_config (
             name TEXT PRIMARY KEY,
             value TEXT NOT NULL
         );
         CREATE TABLE users (
             id INTEGER PRIMARY KEY,
             username TEXT NOT NULL,
             password TEXT NOT NULL
         );
         CREATE TABLE questions (
             id INTEGER PRIMARY KEY,
             parent INTEGER NOT NULL DEFAULT 0,
             qtype TEXT NOT NULL,
             name TEXT NOT NULL
         );
         CREATE TABLE question_categories (
             id INTEGER PRIMARY KEY,
             parent INTEGER NOT NULL DEFAULT 0,
             name TEXT NOT NULL,
             contextid INTEGER NOT NULL DEFAULT 1
         );
         CREATE TABLE course_categories (
             id INTEGER PRIMARY KEY,
             parent INTEGER NOT NULL DEFAULT 0,
             name TEXT NOT NULL
         );",
    )
    .expect("fixture schema");
}

/// In-memory site with the fixture schema, no rows, default config.
pub fn fixture_site() -> Site {
    fixture_site_with(SiteConfig::default())
}

/// In-memory site with the fixture schema and the given config.
pub fn fixture_site_with(config: SiteConfig) -> Site {
    let conn = Connection::open_in_memory().expect("in-memory database");
    schema(&conn);
    Site::from_parts(
        config,
        PathBuf::from("medic.toml"),
        PathBuf::from("data"),
        PathBuf::from("site.db"),
        conn,
    )
}
