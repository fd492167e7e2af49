//! Catalog management service

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorDeletion, AuthorSummary, NewAuthor},
        book::{Book, BookDeletion, BookQuery, BookWithAuthor, NewBook},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Books joined with their author, sorted and filtered per `query`
    pub async fn list_books(&self, query: &BookQuery) -> AppResult<Vec<BookWithAuthor>> {
        let mut conn = self.repository.acquire().await?;
        let books = self.repository.books_list_with_authors(&mut *conn).await?;
        Ok(query.apply(books))
    }

    /// All authors by name, as offered by the add-book form
    pub async fn list_authors(&self) -> AppResult<Vec<Author>> {
        let mut conn = self.repository.acquire().await?;
        self.repository.authors_list(&mut *conn).await
    }

    /// All authors with their book counts
    pub async fn list_author_summaries(&self) -> AppResult<Vec<AuthorSummary>> {
        let mut conn = self.repository.acquire().await?;
        self.repository.authors_list_with_counts(&mut *conn).await
    }

    pub async fn create_author(&self, data: NewAuthor) -> AppResult<Author> {
        let mut tx = self.repository.begin().await?;
        let author = self.repository.authors_create(&mut *tx, &data).await?;
        tx.commit().await?;

        tracing::info!(author_id = author.id, name = %author.name, "Author created");
        Ok(author)
    }

    /// Create a book for an existing author. ISBNs are unique.
    pub async fn create_book(&self, data: NewBook) -> AppResult<Book> {
        let mut tx = self.repository.begin().await?;
        if self
            .repository
            .authors_find_by_id(&mut *tx, data.author_id)
            .await?
            .is_none()
        {
            return Err(AppError::Validation(format!("Author {} does not exist", data.author_id)));
        }
        let book = self.repository.books_create(&mut *tx, &data).await?;
        tx.commit().await?;

        tracing::info!(book_id = book.id, author_id = book.author_id, isbn = %book.isbn, "Book created");
        Ok(book)
    }

    /// Create a book for the author with the given name, creating the author
    /// first when none exists. Both happen in one transaction, so a rejected
    /// book never leaves a new author behind.
    ///
    /// Returns the book and whether the author was created.
    pub async fn create_book_for_author_name(
        &self,
        author_name: &str,
        isbn: &str,
        title: &str,
        publication_year: Option<i32>,
    ) -> AppResult<(Book, bool)> {
        let mut tx = self.repository.begin().await?;

        let (author, author_created) = match self.repository.authors_find_by_name(&mut *tx, author_name).await? {
            Some(author) => (author, false),
            None => {
                let author = self
                    .repository
                    .authors_create(&mut *tx, &NewAuthor::named(author_name))
                    .await?;
                (author, true)
            }
        };

        let book = self
            .repository
            .books_create(
                &mut *tx,
                &NewBook {
                    isbn: isbn.to_string(),
                    title: title.to_string(),
                    publication_year,
                    author_id: author.id,
                },
            )
            .await?;
        tx.commit().await?;

        tracing::debug!(book_id = book.id, author_id = author.id, author_created, "Book created for author name");
        Ok((book, author_created))
    }

    /// Delete a book. When it was the author's last book the author is
    /// deleted too.
    pub async fn delete_book(&self, id: i64) -> AppResult<BookDeletion> {
        let mut tx = self.repository.begin().await?;

        let book = self.repository.books_get_by_id(&mut *tx, id).await?;
        self.repository.books_delete(&mut *tx, id).await?;

        // Counted inside the transaction, after the delete above.
        let remaining = self
            .repository
            .books_count_by_author(&mut *tx, book.author_id)
            .await?;

        let removed_author = if remaining == 0 {
            let author = self.repository.authors_get_by_id(&mut *tx, book.author_id).await?;
            self.repository.authors_delete(&mut *tx, author.id).await?;
            Some(author.name)
        } else {
            None
        };

        tx.commit().await?;

        tracing::info!(
            book_id = id,
            author_id = book.author_id,
            author_removed = removed_author.is_some(),
            "Book deleted"
        );
        Ok(BookDeletion { book, removed_author })
    }

    /// Delete an author and all of its books
    pub async fn delete_author(&self, id: i64) -> AppResult<AuthorDeletion> {
        let mut tx = self.repository.begin().await?;

        let author = self.repository.authors_get_by_id(&mut *tx, id).await?;
        let books = self.repository.books_list_by_author(&mut *tx, id).await?;
        let deleted = self.repository.books_delete_by_author(&mut *tx, id).await?;
        self.repository.authors_delete(&mut *tx, id).await?;

        tx.commit().await?;

        tracing::info!(author_id = id, books_deleted = deleted, "Author deleted");
        Ok(AuthorDeletion {
            author,
            books_removed: books.into_iter().map(|b| b.title).collect(),
        })
    }
}
