//! Category table integrity.
//!
//! Runs the hierarchy validator over one of the platform's category tables
//! and reports records with a missing parent and records stuck in a parent
//! loop. One implementation serves both tables; the catalog registers it
//! once per table.

use std::collections::BTreeSet;

use once_cell::sync::OnceCell;

use crate::db::{self, CategoryTable};
use crate::error::MedicError;
use crate::hierarchy::{find_cycles, find_dangling_parents, NodeId, Snapshot, ROOT};
use crate::problem::{Problem, Severity};
use crate::site::Site;

/// Validator output for one table, computed once per run.
struct TreeFindings {
    snapshot: Snapshot,
    dangling: BTreeSet<NodeId>,
    cycles: BTreeSet<NodeId>,
}

impl TreeFindings {
    fn is_clean(&self) -> bool {
        self.dangling.is_empty() && self.cycles.is_empty()
    }
}

pub struct CategoryTree {
    table: CategoryTable,
    findings: OnceCell<TreeFindings>,
}

impl CategoryTree {
    pub fn new(table: CategoryTable) -> Self {
        Self {
            table,
            findings: OnceCell::new(),
        }
    }

    /// Load the table and classify it, at most once per run. `exists`,
    /// `description` and `solution` all share the same findings.
    fn findings(&self, site: &Site) -> Result<&TreeFindings, MedicError> {
        self.findings.get_or_try_init(|| {
            let snapshot = db::load_category_snapshot(site.db(), self.table)?;
            let dangling = find_dangling_parents(&snapshot);
            let cycles = find_cycles(&snapshot);
            Ok(TreeFindings {
                snapshot,
                dangling,
                cycles,
            })
        })
    }

    /// Bullet list of records whose parent id resolves to nothing.
    fn list_dangling(&self, findings: &TreeFindings) -> String {
        if findings.dangling.is_empty() {
            return String::new();
        }
        let mut out = format!(
            "The following {} records point at a parent that does not exist:\n",
            self.table.label()
        );
        for id in &findings.dangling {
            if let Some(node) = findings.snapshot.get(*id) {
                out.push_str(&format!(
                    "  - {} {}: {} (missing parent {})\n",
                    self.table.label(),
                    node.id,
                    node.name,
                    node.parent_id
                ));
            }
        }
        out
    }

    /// Bullet list of records whose parent chain never reaches the root.
    fn list_cycles(&self, findings: &TreeFindings) -> String {
        if findings.cycles.is_empty() {
            return String::new();
        }
        let mut out = format!(
            "The following {} records are stuck in a parent loop:\n",
            self.table.label()
        );
        for id in &findings.cycles {
            if let Some(node) = findings.snapshot.get(*id) {
                out.push_str(&format!(
                    "  - {} {}: {} (has parent {})\n",
                    self.table.label(),
                    node.id,
                    node.name,
                    node.parent_id
                ));
            }
        }
        out
    }

    fn repair_sql(&self, ids: &BTreeSet<NodeId>) -> String {
        let id_list = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "UPDATE {}\n    SET parent = {ROOT}\n    WHERE id IN ({id_list});\n",
            self.table.table_name()
        )
    }
}

impl Problem for CategoryTree {
    fn id(&self) -> &'static str {
        self.table.check_id()
    }

    fn title(&self) -> String {
        match self.table {
            CategoryTable::QuestionCategories => {
                "Question categories form a broken tree".to_string()
            }
            CategoryTable::CourseCategories => "Course categories form a broken tree".to_string(),
        }
    }

    fn severity(&self) -> Severity {
        Severity::Annoyance
    }

    fn exists(&self, site: &Site) -> Result<bool, MedicError> {
        Ok(!self.findings(site)?.is_clean())
    }

    fn description(&self, site: &Site) -> Result<String, MedicError> {
        let findings = self.findings(site)?;
        let mut description = format!(
            "The {} table is supposed to form a forest of trees, but some \
             records do not reach a tree root.\n",
            self.table.table_name()
        );
        description.push_str(&self.list_dangling(findings));
        description.push_str(&self.list_cycles(findings));
        Ok(description)
    }

    fn solution(&self, site: &Site) -> Result<String, MedicError> {
        let findings = self.findings(site)?;
        let mut solution = String::from(
            "Re-root the affected records, then rebuild the category cache. \
             Review the suggested statements before running them:\n\n",
        );
        if !findings.dangling.is_empty() {
            solution.push_str(&self.repair_sql(&findings.dangling));
        }
        if !findings.cycles.is_empty() {
            solution.push_str(&self.repair_sql(&findings.cycles));
        }
        Ok(solution)
    }
}
