//! Health check catalog.
//!
//! Every check implements [`Problem`] and is registered in [`catalog`].
//! The catalog is an explicit table built once per run; there is no
//! directory scanning and no naming convention to satisfy.

pub mod category_context;
pub mod category_tree;
pub mod data_root;
pub mod db_permissions;
pub mod debug_mode;
pub mod empty_passwords;
pub mod question_parent_types;
pub mod random_question_parents;
pub mod scheduler_overdue;
pub mod upload_limit;
pub mod uploads_disabled;

use serde::{Deserialize, Serialize};

use crate::db::CategoryTable;
use crate::error::MedicError;
use crate::site::Site;

/// How bad a detected problem is, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Security or data-loss risk, fix immediately
    Critical,
    /// Significant impact on day-to-day operation
    Significant,
    /// Annoys users but the site keeps working
    Annoyance,
    /// Worth knowing, may not need fixing
    Notice,
}

impl Severity {
    /// All severities in report order.
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::Significant,
        Severity::Annoyance,
        Severity::Notice,
    ];

    /// Lowercase wire form, matches the serde encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Significant => "significant",
            Severity::Annoyance => "annoyance",
            Severity::Notice => "notice",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference link shown in the solution view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    /// Link text
    pub label: String,
    /// Target URL
    pub url: String,
}

impl Link {
    /// Build a link.
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// One self-contained health check.
///
/// `exists` answers whether the problem is present on the site; the text
/// methods describe it and suggest a fix. Suggested SQL is display-only,
/// the toolkit never writes to the site.
pub trait Problem {
    /// Stable slug, used for the solution drill-down.
    fn id(&self) -> &'static str;

    /// Short headline.
    fn title(&self) -> String;

    /// How bad the problem is when present.
    fn severity(&self) -> Severity;

    /// Whether the problem is present on this site.
    fn exists(&self, site: &Site) -> Result<bool, MedicError>;

    /// What was found, with offending records listed where applicable.
    fn description(&self, site: &Site) -> Result<String, MedicError>;

    /// Suggested fix.
    fn solution(&self, site: &Site) -> Result<String, MedicError>;

    /// Further reading.
    fn links(&self) -> Vec<Link> {
        Vec::new()
    }
}

/// The registration table: every check the toolkit knows about.
pub fn catalog() -> Vec<Box<dyn Problem>> {
    vec![
        Box::new(debug_mode::DebugMode),
        Box::new(db_permissions::DbPermissions),
        Box::new(empty_passwords::EmptyPasswords),
        Box::new(data_root::DataRoot),
        Box::new(scheduler_overdue::SchedulerOverdue),
        Box::new(uploads_disabled::UploadsDisabled),
        Box::new(upload_limit::UploadLimit),
        Box::new(random_question_parents::RandomQuestionParents),
        Box::new(question_parent_types::QuestionParentTypes),
        Box::new(category_context::CategoryContext),
        Box::new(category_tree::CategoryTree::new(
            CategoryTable::QuestionCategories,
        )),
        Box::new(category_tree::CategoryTree::new(
            CategoryTable::CourseCategories,
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn test_catalog_ids_are_unique() {
        let checks = catalog();
        let ids: BTreeSet<&'static str> = checks.iter().map(|c| c.id()).collect();
        assert_eq!(ids.len(), checks.len());
    }

    #[test]
    fn test_severity_order_is_most_severe_first() {
        assert!(Severity::Critical < Severity::Significant);
        assert!(Severity::Significant < Severity::Annoyance);
        assert!(Severity::Annoyance < Severity::Notice);
    }

    #[test]
    fn test_severity_wire_form() {
        let json = serde_json::to_string(&Severity::Significant).unwrap();
        assert_eq!(json, "\"significant\"");
        assert_eq!(Severity::Critical.to_string(), "critical");
    }
}
