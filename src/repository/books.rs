//! Book queries

use sqlx::SqliteConnection;

use super::{map_write_error, Repository};
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookWithAuthor, NewBook},
};

impl Repository {
    /// All books joined with their author, in insertion order
    pub async fn books_list_with_authors(&self, conn: &mut SqliteConnection) -> AppResult<Vec<BookWithAuthor>> {
        let rows = sqlx::query_as::<_, BookWithAuthor>(
            r#"
            SELECT b.id, b.isbn, b.title, b.publication_year, b.author_id,
                   a.name AS author_name
            FROM book b
            JOIN author a ON a.id = b.author_id
            ORDER BY b.id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows)
    }

    /// Get book by ID
    pub async fn books_get_by_id(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>("SELECT id, isbn, title, publication_year, author_id FROM book WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    /// List the books of one author by title
    pub async fn books_list_by_author(&self, conn: &mut SqliteConnection, author_id: i64) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, isbn, title, publication_year, author_id
            FROM book
            WHERE author_id = ?
            ORDER BY title COLLATE NOCASE, id
            "#,
        )
        .bind(author_id)
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows)
    }

    /// Count the books of one author
    pub async fn books_count_by_author(&self, conn: &mut SqliteConnection, author_id: i64) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM book WHERE author_id = ?")
            .bind(author_id)
            .fetch_one(&mut *conn)
            .await?;
        Ok(count)
    }

    /// Create book
    pub async fn books_create(&self, conn: &mut SqliteConnection, data: &NewBook) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO book (isbn, title, publication_year, author_id)
            VALUES (?, ?, ?, ?)
            RETURNING id, isbn, title, publication_year, author_id
            "#,
        )
        .bind(&data.isbn)
        .bind(&data.title)
        .bind(data.publication_year)
        .bind(data.author_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_write_error(e, || format!("A book with ISBN {} already exists", data.isbn)))
    }

    /// Delete book
    pub async fn books_delete(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }

    /// Delete every book of one author, returning how many were removed
    pub async fn books_delete_by_author(&self, conn: &mut SqliteConnection, author_id: i64) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM book WHERE author_id = ?")
            .bind(author_id)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }
}
