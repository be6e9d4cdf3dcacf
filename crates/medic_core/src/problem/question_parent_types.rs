//! Questions whose parent is not a container question.
//!
//! Only container types (random, multianswer) may own child questions.
//! Any other parent type is left over from a broken import.

use crate::error::MedicError;
use crate::problem::{Problem, Severity};
use crate::site::Site;

pub struct QuestionParentTypes;

impl QuestionParentTypes {
    fn offenders(&self, site: &Site) -> Result<Vec<(i64, String, String)>, MedicError> {
        let mut stmt = site.db().prepare(
            "SELECT q.id, q.name, parent_q.qtype
             FROM questions q
                 JOIN questions parent_q ON parent_q.id = q.parent
             WHERE parent_q.qtype NOT IN ('random', 'multianswer')
             ORDER BY q.id",
        )?;
        let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?;
        let mut offenders = Vec::new();
        for row in rows {
            offenders.push(row?);
        }
        Ok(offenders)
    }
}

impl Problem for QuestionParentTypes {
    fn id(&self) -> &'static str {
        "question-parent-types"
    }

    fn title(&self) -> String {
        "Questions owned by a non-container question".to_string()
    }

    fn severity(&self) -> Severity {
        Severity::Annoyance
    }

    fn exists(&self, site: &Site) -> Result<bool, MedicError> {
        Ok(!self.offenders(site)?.is_empty())
    }

    fn description(&self, site: &Site) -> Result<String, MedicError> {
        let offenders = self.offenders(site)?;
        let mut description = format!(
            "{} question(s) have a parent question that is not a container type:\n",
            offenders.len()
        );
        for (id, name, parent_type) in &offenders {
            description.push_str(&format!(
                "  - question {id}: {name} (parent is a '{parent_type}' question)\n"
            ));
        }
        Ok(description)
    }

    fn solution(&self, _site: &Site) -> Result<String, MedicError> {
        Ok("Run the question bank cleanup job, which detaches child questions \
            from non-container parents. If the listed questions belong to a \
            quiz attempt, regrade the quiz afterwards."
            .to_string())
    }
}
