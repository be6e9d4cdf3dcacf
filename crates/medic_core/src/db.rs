//! Record database access.
//!
//! The platform keeps its records in a SQLite database. Checks only ever
//! read from it, so the connection is opened read-only; suggested repair
//! SQL is displayed to the operator, never executed.

use std::path::Path;

use rusqlite::{Connection, OpenFlags, OptionalExtension};

use crate::error::MedicError;
use crate::hierarchy::{Node, Snapshot};

/// Open the record database read-only.
pub fn open(path: &Path) -> Result<Connection, MedicError> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
    Ok(conn)
}

/// The hierarchical category tables the platform maintains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryTable {
    /// Question bank categories
    QuestionCategories,
    /// Course categories
    CourseCategories,
}

impl CategoryTable {
    /// SQL table name.
    pub fn table_name(&self) -> &'static str {
        match self {
            CategoryTable::QuestionCategories => "question_categories",
            CategoryTable::CourseCategories => "course_categories",
        }
    }

    /// Human-readable record label, singular.
    pub fn label(&self) -> &'static str {
        match self {
            CategoryTable::QuestionCategories => "question category",
            CategoryTable::CourseCategories => "course category",
        }
    }

    /// Stable check id for the tree check over this table.
    pub fn check_id(&self) -> &'static str {
        match self {
            CategoryTable::QuestionCategories => "question-category-tree",
            CategoryTable::CourseCategories => "course-category-tree",
        }
    }
}

/// Load one category table into a hierarchy snapshot.
pub fn load_category_snapshot(
    conn: &Connection,
    table: CategoryTable,
) -> Result<Snapshot, MedicError> {
    let sql = format!(
        "SELECT id, parent, name FROM {} ORDER BY id",
        table.table_name()
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(Node::new(
            row.get::<_, i64>(0)?,
            row.get::<_, i64>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut snapshot = Snapshot::new();
    for node in rows {
        snapshot.insert(node?)?;
    }
    Ok(snapshot)
}

/// Read one value from the platform's `site_config` key/value table.
pub fn site_config_value(conn: &Connection, name: &str) -> Result<Option<String>, MedicError> {
    let value = conn
        .query_row(
            "SELECT value FROM site_config WHERE name = ?1",
            [name],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::{find_cycles, find_dangling_parents};

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE site_config (name TEXT PRIMARY KEY, value TEXT NOT NULL);
             CREATE TABLE question_categories (
                 id INTEGER PRIMARY KEY,
                 parent INTEGER NOT NULL DEFAULT 0,
                 name TEXT NOT NULL,
                 contextid INTEGER NOT NULL DEFAULT 1
             );",
        )
        .unwrap();
        conn
    }

    #[test]
    fn test_load_category_snapshot() {
        let conn = memory_db();
        conn.execute_batch(
            "INSERT INTO question_categories (id, parent, name) VALUES
                 (1, 0, 'Top'),
                 (2, 1, 'Algebra'),
                 (3, 9, 'Orphan');",
        )
        .unwrap();

        let snapshot =
            load_category_snapshot(&conn, CategoryTable::QuestionCategories).unwrap();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.get(2).unwrap().name, "Algebra");
        assert_eq!(
            find_dangling_parents(&snapshot).into_iter().collect::<Vec<_>>(),
            vec![3]
        );
        assert!(find_cycles(&snapshot).is_empty());
    }

    #[test]
    fn test_load_empty_table() {
        let conn = memory_db();
        let snapshot =
            load_category_snapshot(&conn, CategoryTable::QuestionCategories).unwrap();
        assert!(snapshot.is_empty());
    }

    #[test]
    fn test_site_config_value() {
        let conn = memory_db();
        conn.execute(
            "INSERT INTO site_config (name, value) VALUES ('lastcronstart', '12345')",
            [],
        )
        .unwrap();

        assert_eq!(
            site_config_value(&conn, "lastcronstart").unwrap().as_deref(),
            Some("12345")
        );
        assert_eq!(site_config_value(&conn, "missing").unwrap(), None);
    }
}
