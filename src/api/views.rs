//! Page view models rendered with askama

use askama::Template;
use chrono::NaiveDate;

use crate::models::{
    author::{Author, AuthorSummary},
    book::{BookQuery, BookWithAuthor},
};

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_else(|| "-".to_string())
}

/// Book row for the home page table
#[derive(Debug, Clone)]
pub struct BookRow {
    pub id: i64,
    pub isbn: String,
    pub title: String,
    pub year: String,
    pub author_name: String,
}

impl From<BookWithAuthor> for BookRow {
    fn from(book: BookWithAuthor) -> Self {
        Self {
            id: book.id,
            isbn: book.isbn,
            title: book.title,
            year: book
                .publication_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "-".to_string()),
            author_name: book.author_name,
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexView {
    pub flash: String,
    pub books: Vec<BookRow>,
    pub sort: String,
    pub q: String,
}

impl IndexView {
    pub fn new(books: Vec<BookWithAuthor>, query: &BookQuery, flash: Option<String>) -> Self {
        Self {
            flash: flash.unwrap_or_default(),
            books: books.into_iter().map(BookRow::from).collect(),
            sort: query.sort_key().as_str().to_string(),
            q: query.keyword().unwrap_or_default().to_string(),
        }
    }
}

/// Author row for the authors page
#[derive(Debug, Clone)]
pub struct AuthorRow {
    pub id: i64,
    pub name: String,
    pub born: String,
    pub died: String,
    pub book_count: i64,
}

impl From<AuthorSummary> for AuthorRow {
    fn from(author: AuthorSummary) -> Self {
        Self {
            id: author.id,
            name: author.name,
            born: format_date(author.birth_date),
            died: format_date(author.date_of_death),
            book_count: author.book_count,
        }
    }
}

#[derive(Template)]
#[template(path = "authors.html")]
pub struct AuthorsView {
    pub flash: String,
    pub authors: Vec<AuthorRow>,
}

impl AuthorsView {
    pub fn new(authors: Vec<AuthorSummary>, flash: Option<String>) -> Self {
        Self {
            flash: flash.unwrap_or_default(),
            authors: authors.into_iter().map(AuthorRow::from).collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "add_author.html")]
pub struct AddAuthorView {
    pub flash: String,
}

/// Author choice in the add-book form
#[derive(Debug, Clone)]
pub struct AuthorOption {
    pub id: i64,
    pub name: String,
}

#[derive(Template)]
#[template(path = "add_book.html")]
pub struct AddBookView {
    pub flash: String,
    pub authors: Vec<AuthorOption>,
}

impl AddBookView {
    pub fn new(authors: Vec<Author>, flash: Option<String>) -> Self {
        Self {
            flash: flash.unwrap_or_default(),
            authors: authors
                .into_iter()
                .map(|a| AuthorOption { id: a.id, name: a.name })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_escapes_titles() {
        let books = vec![BookWithAuthor {
            id: 1,
            isbn: "1".into(),
            title: "<script>alert(1)</script>".into(),
            publication_year: None,
            author_id: 1,
            author_name: "Amy".into(),
        }];
        let html = IndexView::new(books, &BookQuery::default(), None).render().unwrap();
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn test_flash_shown() {
        let html = AddAuthorView {
            flash: "Author 'Amy' added successfully.".into(),
        }
        .render()
        .unwrap();
        assert!(html.contains("class=\"flash\""));
        assert!(html.contains("added successfully"));
    }

    #[test]
    fn test_author_row_dates() {
        let row = AuthorRow::from(AuthorSummary {
            id: 1,
            name: "Amy".into(),
            birth_date: NaiveDate::from_ymd_opt(1952, 2, 19),
            date_of_death: None,
            book_count: 2,
        });
        assert_eq!(row.born, "1952-02-19");
        assert_eq!(row.died, "-");
    }
}
