//! Import report models for library seeding.

use serde::Serialize;

/// What happened to a single imported entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImportAction {
    Created,
    SkippedDuplicate,
    SkippedIncomplete,
    Failed,
}

/// Per-entry result.
#[derive(Debug, Clone, Serialize)]
pub struct ImportOutcome {
    pub action: ImportAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Report for a whole import run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub authors_created: usize,
    pub outcomes: Vec<ImportOutcome>,
}

impl ImportReport {
    pub fn count(&self, action: ImportAction) -> usize {
        self.outcomes.iter().filter(|o| o.action == action).count()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} book(s) created, {} author(s) created, {} duplicate(s) skipped, {} incomplete skipped, {} failed",
            self.count(ImportAction::Created),
            self.authors_created,
            self.count(ImportAction::SkippedDuplicate),
            self.count(ImportAction::SkippedIncomplete),
            self.count(ImportAction::Failed),
        )
    }
}
