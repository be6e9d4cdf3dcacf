//! End-to-end inspector runs against a fixture site on disk.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::Connection;
use tempfile::TempDir;

use medic_core::inspector::{run_checks, solution_view};
use medic_core::problem::{catalog, Severity};
use medic_core::Site;

/// Lay out a healthy site in a temp directory and return its config path.
fn healthy_site() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("medic.toml");
    fs::write(
        &config_path,
        r#"
        [site]
        name = "fixture"
        data_root = "data"

        [database]
        path = "site.db"
        "#,
    )
    .unwrap();
    fs::create_dir(dir.path().join("data")).unwrap();

    let db_path = dir.path().join("site.db");
    let conn = Connection::open(&db_path).unwrap();
    conn.execute_batch(
        "CREATE TABLE site_config (name TEXT PRIMARY KEY, value TEXT NOT NULL);
         CREATE TABLE users (id INTEGER PRIMARY KEY, username TEXT NOT NULL, password TEXT NOT NULL);
         CREATE TABLE questions (id INTEGER PRIMARY KEY, parent INTEGER NOT NULL DEFAULT 0, qtype TEXT NOT NULL, name TEXT NOT NULL);
         CREATE TABLE question_categories (id INTEGER PRIMARY KEY, parent INTEGER NOT NULL DEFAULT 0, name TEXT NOT NULL, contextid INTEGER NOT NULL DEFAULT 1);
         CREATE TABLE course_categories (id INTEGER PRIMARY KEY, parent INTEGER NOT NULL DEFAULT 0, name TEXT NOT NULL);

         INSERT INTO users (id, username, password) VALUES
             (1, 'admin', '$argon2id$stub');
         INSERT INTO questions (id, parent, qtype, name) VALUES
             (1, 1, 'random', 'Random pick'),
             (2, 0, 'truefalse', 'Sky is blue');
         INSERT INTO question_categories (id, parent, name, contextid) VALUES
             (1, 0, 'Top', 1),
             (2, 1, 'Algebra', 1);
         INSERT INTO course_categories (id, parent, name) VALUES
             (1, 0, 'Science'),
             (2, 1, 'Physics');",
    )
    .unwrap();
    conn.execute(
        "INSERT INTO site_config (name, value) VALUES ('lastcronstart', ?1)",
        [Utc::now().timestamp().to_string()],
    )
    .unwrap();
    drop(conn);

    // The database must not be readable by other local users.
    fs::set_permissions(&db_path, fs::Permissions::from_mode(0o600)).unwrap();

    (dir, config_path)
}

fn reopen(db_path: &Path) -> Connection {
    Connection::open(db_path).unwrap()
}

#[test]
fn test_healthy_site_reports_clean() {
    let (_dir, config_path) = healthy_site();
    let site = Site::open(&config_path).unwrap();
    let report = run_checks(&site, &catalog());
    assert!(
        report.is_clean(),
        "expected a clean report, got problems {:?} and failures {:?}",
        report.problems.iter().map(|p| &p.id).collect::<Vec<_>>(),
        report.failures.iter().map(|f| &f.id).collect::<Vec<_>>()
    );
}

#[test]
fn test_corrupted_site_reports_grouped_problems() {
    let (dir, config_path) = healthy_site();

    {
        let conn = reopen(&dir.path().join("site.db"));
        conn.execute_batch(
            // A loop in the course tree, an orphan in the question tree
            // and an account without a password.
            "INSERT INTO course_categories (id, parent, name) VALUES
                 (3, 4, 'Chemistry'),
                 (4, 3, 'Organic');
             INSERT INTO question_categories (id, parent, name, contextid) VALUES
                 (3, 9, 'Orphan', 1);
             INSERT INTO users (id, username, password) VALUES
                 (2, 'guest', '');",
        )
        .unwrap();
    }
    fs::set_permissions(
        dir.path().join("site.db"),
        fs::Permissions::from_mode(0o600),
    )
    .unwrap();

    let site = Site::open(&config_path).unwrap();
    let report = run_checks(&site, &catalog());

    let ids: Vec<&str> = report.problems.iter().map(|p| p.id.as_str()).collect();
    assert!(ids.contains(&"empty-passwords"));
    assert!(ids.contains(&"question-category-tree"));
    assert!(ids.contains(&"course-category-tree"));
    assert!(report.has_critical());

    // Critical findings come before annoyances.
    assert_eq!(report.problems[0].severity, Severity::Critical);

    let tree = report
        .problems
        .iter()
        .find(|p| p.id == "course-category-tree")
        .unwrap();
    assert!(tree.description.contains("course category 3: Chemistry"));
    assert!(tree.description.contains("course category 4: Organic"));
}

#[test]
fn test_solution_drilldown_for_tree_check() {
    let (dir, config_path) = healthy_site();
    {
        let conn = reopen(&dir.path().join("site.db"));
        conn.execute_batch(
            "INSERT INTO course_categories (id, parent, name) VALUES (3, 3, 'Loop');",
        )
        .unwrap();
    }
    fs::set_permissions(
        dir.path().join("site.db"),
        fs::Permissions::from_mode(0o600),
    )
    .unwrap();

    let site = Site::open(&config_path).unwrap();
    let view = solution_view(&site, &catalog(), "course-category-tree")
        .unwrap()
        .expect("known check id");
    assert_eq!(view.severity, Severity::Annoyance);
    assert!(view.solution.contains("UPDATE course_categories"));
    assert!(view.solution.contains("WHERE id IN (3)"));
}

#[test]
fn test_report_serializes_to_json_and_back() {
    let (_dir, config_path) = healthy_site();
    let site = Site::open(&config_path).unwrap();
    let report = run_checks(&site, &catalog());

    let json = serde_json::to_string_pretty(&report).unwrap();
    let parsed: medic_core::HealthReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.site, "fixture");
    assert_eq!(parsed.problems.len(), report.problems.len());
}
