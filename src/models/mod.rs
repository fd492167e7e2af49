//! Data models for Book Alchemy

pub mod author;
pub mod book;
pub mod form;
pub mod import_report;
pub mod library_entry;

// Re-export commonly used types
pub use author::{Author, AuthorDeletion, AuthorForm, AuthorSummary, NewAuthor};
pub use book::{Book, BookDeletion, BookForm, BookQuery, BookWithAuthor, NewBook, SortKey};
pub use import_report::{ImportAction, ImportOutcome, ImportReport};
pub use library_entry::{LibraryEntry, LibraryResponse};
