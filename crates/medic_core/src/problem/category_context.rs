//! Question categories in a different context than their parent.

use crate::error::MedicError;
use crate::problem::{Link, Problem, Severity};
use crate::site::Site;

struct ContextMismatch {
    child_id: i64,
    child_name: String,
    child_context: i64,
    parent_id: i64,
    parent_name: String,
    parent_context: i64,
}

pub struct CategoryContext;

impl CategoryContext {
    fn mismatches(&self, site: &Site) -> Result<Vec<ContextMismatch>, MedicError> {
        let mut stmt = site.db().prepare(
            "SELECT child.id, child.name, child.contextid,
                    parent.id, parent.name, parent.contextid
             FROM question_categories child
                 JOIN question_categories parent ON child.parent = parent.id
             WHERE child.contextid <> parent.contextid
             ORDER BY child.id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ContextMismatch {
                child_id: row.get(0)?,
                child_name: row.get(1)?,
                child_context: row.get(2)?,
                parent_id: row.get(3)?,
                parent_name: row.get(4)?,
                parent_context: row.get(5)?,
            })
        })?;
        let mut mismatches = Vec::new();
        for row in rows {
            mismatches.push(row?);
        }
        Ok(mismatches)
    }
}

impl Problem for CategoryContext {
    fn id(&self) -> &'static str {
        "category-context"
    }

    fn title(&self) -> String {
        "Question categories outside their parent's context".to_string()
    }

    fn severity(&self) -> Severity {
        Severity::Annoyance
    }

    fn exists(&self, site: &Site) -> Result<bool, MedicError> {
        Ok(!self.mismatches(site)?.is_empty())
    }

    fn description(&self, site: &Site) -> Result<String, MedicError> {
        let mismatches = self.mismatches(site)?;
        let mut description = format!(
            "{} question categor(ies) sit in a different context than their \
             parent category, so parts of the question bank UI will not show \
             them:\n",
            mismatches.len()
        );
        for m in &mismatches {
            description.push_str(&format!(
                "  - category {} '{}' (context {}) has parent {} '{}' (context {})\n",
                m.child_id, m.child_name, m.child_context, m.parent_id, m.parent_name,
                m.parent_context
            ));
        }
        Ok(description)
    }

    fn solution(&self, _site: &Site) -> Result<String, MedicError> {
        Ok("Move each listed category into its parent's context, or re-parent \
            it to a top-level category of its own context. The question bank \
            cleanup job fixes the simple cases automatically."
            .to_string())
    }

    fn links(&self) -> Vec<Link> {
        vec![Link::new(
            "Question bank maintenance",
            "https://github.com/medic-team/medic/wiki/Question-bank",
        )]
    }
}
