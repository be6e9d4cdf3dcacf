//! Random questions that are not their own parent.
//!
//! A random question draws from its own category at attempt time, which
//! the platform models by making the record its own parent. Import bugs
//! and old upgrades leave random questions pointing elsewhere, and those
//! break quiz regrading.

use crate::error::MedicError;
use crate::problem::{Problem, Severity};
use crate::site::Site;

pub struct RandomQuestionParents;

impl RandomQuestionParents {
    fn broken_count(&self, site: &Site) -> Result<i64, MedicError> {
        let count = site.db().query_row(
            "SELECT COUNT(*) FROM questions WHERE qtype = 'random' AND parent <> id",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

impl Problem for RandomQuestionParents {
    fn id(&self) -> &'static str {
        "random-question-parents"
    }

    fn title(&self) -> String {
        "Random questions with the wrong parent".to_string()
    }

    fn severity(&self) -> Severity {
        Severity::Annoyance
    }

    fn exists(&self, site: &Site) -> Result<bool, MedicError> {
        Ok(self.broken_count(site)? > 0)
    }

    fn description(&self, site: &Site) -> Result<String, MedicError> {
        Ok(format!(
            "{} random question(s) do not have themselves as parent. Quizzes \
             using them may pick the wrong pool of questions or fail to \
             regrade.",
            self.broken_count(site)?
        ))
    }

    fn solution(&self, _site: &Site) -> Result<String, MedicError> {
        Ok("Re-point each random question at itself:\n\n\
            UPDATE questions SET parent = id WHERE qtype = 'random' AND parent <> id;"
            .to_string())
    }
}
