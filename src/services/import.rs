//! Library seeding from Audible entries
//!
//! Best effort: every entry is imported on its own, and a rejected entry is
//! recorded in the report instead of stopping the run.

use crate::{
    error::{AppError, AppResult},
    models::{
        import_report::{ImportAction, ImportOutcome, ImportReport},
        library_entry::LibraryEntry,
    },
    services::catalog::CatalogService,
};

#[derive(Clone)]
pub struct ImportService {
    catalog: CatalogService,
}

impl ImportService {
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }

    pub async fn import_entries(&self, entries: &[LibraryEntry]) -> AppResult<ImportReport> {
        let mut report = ImportReport::default();

        for entry in entries {
            let (outcome, author_created) = self.import_entry(entry).await;
            if author_created {
                report.authors_created += 1;
            }
            match outcome.action {
                ImportAction::Created => {}
                ImportAction::Failed => tracing::error!(
                    title = outcome.title.as_deref().unwrap_or("-"),
                    "Import failed: {}",
                    outcome.message.as_deref().unwrap_or_default()
                ),
                _ => tracing::warn!(
                    title = outcome.title.as_deref().unwrap_or("-"),
                    "Entry skipped: {}",
                    outcome.message.as_deref().unwrap_or_default()
                ),
            }
            report.outcomes.push(outcome);
        }

        tracing::info!("Import finished: {}", report.summary());
        Ok(report)
    }

    async fn import_entry(&self, entry: &LibraryEntry) -> (ImportOutcome, bool) {
        let title = entry.title().map(str::to_string);
        let skipped = |message: &str| ImportOutcome {
            action: ImportAction::SkippedIncomplete,
            book_id: None,
            title: title.clone(),
            warnings: Vec::new(),
            message: Some(message.to_string()),
        };

        let Some(book_title) = entry.title() else {
            return (skipped("Entry has no title"), false);
        };
        let Some(isbn) = entry.identifier() else {
            return (skipped("Entry has neither ISBN nor ASIN"), false);
        };

        let mut warnings = Vec::new();
        let publication_year = entry.publication_year().unwrap_or_else(|w| {
            warnings.push(w);
            None
        });

        let result = self
            .catalog
            .create_book_for_author_name(entry.author_name(), isbn, book_title, publication_year)
            .await;

        match result {
            Ok((book, author_created)) => (
                ImportOutcome {
                    action: ImportAction::Created,
                    book_id: Some(book.id),
                    title,
                    warnings,
                    message: None,
                },
                author_created,
            ),
            Err(AppError::Conflict(message)) => (
                ImportOutcome {
                    action: ImportAction::SkippedDuplicate,
                    book_id: None,
                    title,
                    warnings,
                    message: Some(message),
                },
                false,
            ),
            Err(e) => (
                ImportOutcome {
                    action: ImportAction::Failed,
                    book_id: None,
                    title,
                    warnings,
                    message: Some(e.to_string()),
                },
                false,
            ),
        }
    }
}
