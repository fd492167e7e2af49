//! Book model, listing query and related types

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::form::{non_blank, parse_optional_int};
use crate::error::{AppError, AppResult};

/// Full book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Book {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub publication_year: Option<i32>,
    pub author_id: i64,
}

/// Book joined with its author, as shown on the home page
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BookWithAuthor {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub publication_year: Option<i32>,
    pub author_id: i64,
    pub author_name: String,
}

impl BookWithAuthor {
    /// Whether `keyword` occurs in the title or the author name, ignoring case.
    /// `keyword` must already be lowercase.
    pub fn matches(&self, keyword: &str) -> bool {
        self.title.to_lowercase().contains(keyword) || self.author_name.to_lowercase().contains(keyword)
    }
}

/// Raw add-book form submission
#[derive(Debug, Default, Deserialize)]
pub struct BookForm {
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub publication_year: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
}

/// Validated create book request
#[derive(Debug, Clone, Validate)]
pub struct NewBook {
    #[validate(length(min = 1, message = "ISBN is required"))]
    pub isbn: String,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub publication_year: Option<i32>,
    pub author_id: i64,
}

impl TryFrom<BookForm> for NewBook {
    type Error = AppError;

    fn try_from(form: BookForm) -> AppResult<Self> {
        let author_id = parse_optional_int::<i64>("Author", form.author_id)?
            .ok_or_else(|| AppError::Validation("Author is required".to_string()))?;
        let book = NewBook {
            isbn: non_blank(form.isbn).unwrap_or_default(),
            title: non_blank(form.title).unwrap_or_default(),
            publication_year: parse_optional_int("Publication year", form.publication_year)?,
            author_id,
        };
        book.validate()?;
        Ok(book)
    }
}

/// Home page ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Title,
    Author,
    Year,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Title => "title",
            SortKey::Author => "author",
            SortKey::Year => "year",
        }
    }

    /// Ordering of two listing rows. Text compares by its Unicode lowercase
    /// form; ties fall back to the title, then the id.
    pub fn compare(&self, a: &BookWithAuthor, b: &BookWithAuthor) -> Ordering {
        let by_title = || {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then(a.id.cmp(&b.id))
        };
        match self {
            SortKey::Title => by_title(),
            SortKey::Author => a
                .author_name
                .to_lowercase()
                .cmp(&b.author_name.to_lowercase())
                .then_with(by_title),
            // Unknown years last
            SortKey::Year => match (a.publication_year, b.publication_year) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
            .then_with(by_title),
        }
    }
}

/// Unrecognized keys fall back to title order
impl From<&str> for SortKey {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "author" => SortKey::Author,
            "year" => SortKey::Year,
            _ => SortKey::Title,
        }
    }
}

/// Query parameters of the home page
#[derive(Debug, Default, Clone, Deserialize)]
pub struct BookQuery {
    pub sort: Option<String>,
    pub q: Option<String>,
}

impl BookQuery {
    pub fn sort_key(&self) -> SortKey {
        self.sort.as_deref().map(SortKey::from).unwrap_or_default()
    }

    /// Search keyword, `None` when blank
    pub fn keyword(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// Filter and order listing rows
    pub fn apply(&self, mut books: Vec<BookWithAuthor>) -> Vec<BookWithAuthor> {
        if let Some(keyword) = self.keyword().map(str::to_lowercase) {
            books.retain(|book| book.matches(&keyword));
        }
        let sort = self.sort_key();
        books.sort_by(|a, b| sort.compare(a, b));
        books
    }
}

/// Outcome of deleting a book
#[derive(Debug, Clone)]
pub struct BookDeletion {
    pub book: Book,
    /// Set when the book was its author's last one and the author went with it
    pub removed_author: Option<String>,
}

impl BookDeletion {
    pub fn message(&self) -> String {
        match &self.removed_author {
            Some(name) => format!(
                "Deleted book '{}' and its author '{}', who had no other books.",
                self.book.title, name
            ),
            None => format!("Deleted book '{}'.", self.book.title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_key_fallback() {
        assert_eq!(SortKey::from("author"), SortKey::Author);
        assert_eq!(SortKey::from("YEAR"), SortKey::Year);
        assert_eq!(SortKey::from("title"), SortKey::Title);
        assert_eq!(SortKey::from("publisher"), SortKey::Title);
        assert_eq!(BookQuery::default().sort_key(), SortKey::Title);
    }

    #[test]
    fn test_blank_keyword_disables_filter() {
        let query = BookQuery {
            sort: None,
            q: Some("   ".into()),
        };
        assert_eq!(query.keyword(), None);

        let query = BookQuery {
            sort: None,
            q: Some(" alc ".into()),
        };
        assert_eq!(query.keyword(), Some("alc"));
    }

    fn row(id: i64, title: &str, author_name: &str, year: Option<i32>) -> BookWithAuthor {
        BookWithAuthor {
            id,
            isbn: id.to_string(),
            title: title.into(),
            publication_year: year,
            author_id: id,
            author_name: author_name.into(),
        }
    }

    #[test]
    fn test_accented_keyword_ignores_case() {
        let book = row(1, "Émile ou De l'éducation", "Jean-Jacques Rousseau", None);
        for q in ["Émile", "émile", "ÉMILE", "ÉDUCATION"] {
            assert!(book.matches(&q.to_lowercase()), "{} should match", q);
        }
        let author = row(2, "Germinal", "Émile Zola", Some(1885));
        assert!(author.matches(&"ÉMILE ZOLA".to_lowercase()));
        assert!(!author.matches("émilie"));
    }

    #[test]
    fn test_accented_titles_sort_by_lowercase() {
        let query = BookQuery {
            sort: Some("title".into()),
            q: None,
        };
        let books = query.apply(vec![
            row(1, "Zazie dans le métro", "Queneau", None),
            row(2, "Étranger", "Camus", None),
            row(3, "émaux et camées", "Gautier", None),
            row(4, "Dune", "Herbert", None),
        ]);
        let titles: Vec<&str> = books.iter().map(|b| b.title.as_str()).collect();
        // Lowercase 'é' orders after all ASCII letters
        assert_eq!(titles, vec!["Dune", "Zazie dans le métro", "émaux et camées", "Étranger"]);
    }

    #[test]
    fn test_author_sort_ignores_case_beyond_ascii() {
        let query = BookQuery {
            sort: Some("author".into()),
            q: None,
        };
        let books = query.apply(vec![
            row(1, "B", "Élodie", None),
            row(2, "A", "élise", None),
            row(3, "C", "Zoe", None),
        ]);
        let authors: Vec<&str> = books.iter().map(|b| b.author_name.as_str()).collect();
        assert_eq!(authors, vec!["Zoe", "élise", "Élodie"]);
    }

    #[test]
    fn test_book_form() {
        let form = BookForm {
            isbn: Some("9780441478125".into()),
            title: Some("The Left Hand of Darkness".into()),
            publication_year: Some("1969".into()),
            author_id: Some("3".into()),
        };
        let book = NewBook::try_from(form).unwrap();
        assert_eq!(book.publication_year, Some(1969));
        assert_eq!(book.author_id, 3);
    }

    #[test]
    fn test_book_form_rejections() {
        let missing_author = BookForm {
            isbn: Some("1".into()),
            title: Some("T".into()),
            ..Default::default()
        };
        assert!(matches!(NewBook::try_from(missing_author), Err(AppError::Validation(_))));

        let bad_year = BookForm {
            isbn: Some("1".into()),
            title: Some("T".into()),
            publication_year: Some("1969a".into()),
            author_id: Some("1".into()),
        };
        assert!(matches!(NewBook::try_from(bad_year), Err(AppError::Validation(_))));

        let missing_isbn = BookForm {
            title: Some("T".into()),
            author_id: Some("1".into()),
            ..Default::default()
        };
        match NewBook::try_from(missing_isbn) {
            Err(AppError::Validation(msg)) => assert_eq!(msg, "ISBN is required"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_deletion_messages() {
        let book = Book {
            id: 1,
            isbn: "1".into(),
            title: "Kindred".into(),
            publication_year: Some(1979),
            author_id: 1,
        };
        let kept = BookDeletion {
            book: book.clone(),
            removed_author: None,
        };
        assert_eq!(kept.message(), "Deleted book 'Kindred'.");

        let cascaded = BookDeletion {
            book,
            removed_author: Some("Octavia Butler".into()),
        };
        assert!(cascaded.message().contains("and its author 'Octavia Butler'"));
    }
}
