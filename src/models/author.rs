//! Author model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::form::{non_blank, parse_optional_date};
use crate::error::{AppError, AppResult};

/// Full author model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// Author row for the authors listing
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AuthorSummary {
    pub id: i64,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
    pub book_count: i64,
}

/// Raw add-author form submission
#[derive(Debug, Default, Deserialize)]
pub struct AuthorForm {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub date_of_death: Option<String>,
}

/// Validated create author request
#[derive(Debug, Clone, Validate)]
pub struct NewAuthor {
    #[validate(length(min = 1, message = "Author name is required"))]
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl NewAuthor {
    /// Author with only a name, as created by the importer
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            birth_date: None,
            date_of_death: None,
        }
    }
}

impl TryFrom<AuthorForm> for NewAuthor {
    type Error = AppError;

    fn try_from(form: AuthorForm) -> AppResult<Self> {
        let author = NewAuthor {
            name: non_blank(form.name).unwrap_or_default(),
            birth_date: parse_optional_date("Birth date", form.birth_date)?,
            date_of_death: parse_optional_date("Date of death", form.date_of_death)?,
        };
        author.validate()?;
        Ok(author)
    }
}

/// Outcome of deleting an author together with its books
#[derive(Debug, Clone)]
pub struct AuthorDeletion {
    pub author: Author,
    pub books_removed: Vec<String>,
}

impl AuthorDeletion {
    pub fn message(&self) -> String {
        format!(
            "Deleted author '{}' and {} book(s).",
            self.author.name,
            self.books_removed.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_with_dates() {
        let form = AuthorForm {
            name: Some(" Ursula K. Le Guin ".into()),
            birth_date: Some("1929-10-21".into()),
            date_of_death: Some("2018-01-22".into()),
        };
        let author = NewAuthor::try_from(form).unwrap();
        assert_eq!(author.name, "Ursula K. Le Guin");
        assert_eq!(author.birth_date, NaiveDate::from_ymd_opt(1929, 10, 21));
        assert_eq!(author.date_of_death, NaiveDate::from_ymd_opt(2018, 1, 22));
    }

    #[test]
    fn test_blank_dates_are_none() {
        let form = AuthorForm {
            name: Some("Octavia Butler".into()),
            birth_date: Some("".into()),
            date_of_death: None,
        };
        let author = NewAuthor::try_from(form).unwrap();
        assert!(author.birth_date.is_none());
        assert!(author.date_of_death.is_none());
    }

    #[test]
    fn test_missing_name_rejected() {
        let form = AuthorForm {
            name: Some("   ".into()),
            ..Default::default()
        };
        match NewAuthor::try_from(form) {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "Author name is required"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_date_rejected() {
        let form = AuthorForm {
            name: Some("Octavia Butler".into()),
            birth_date: Some("June 22, 1947".into()),
            date_of_death: None,
        };
        assert!(matches!(NewAuthor::try_from(form), Err(AppError::Validation(_))));
    }
}
