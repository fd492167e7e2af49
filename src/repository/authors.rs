//! Author queries

use sqlx::SqliteConnection;

use super::{map_write_error, Repository};
use crate::{
    error::{AppError, AppResult},
    models::author::{Author, AuthorSummary, NewAuthor},
};

impl Repository {
    /// List all authors by name
    pub async fn authors_list(&self, conn: &mut SqliteConnection) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>(
            "SELECT id, name, birth_date, date_of_death FROM author ORDER BY name COLLATE NOCASE, id",
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows)
    }

    /// List all authors with the number of books each one has
    pub async fn authors_list_with_counts(&self, conn: &mut SqliteConnection) -> AppResult<Vec<AuthorSummary>> {
        let rows = sqlx::query_as::<_, AuthorSummary>(
            r#"
            SELECT a.id, a.name, a.birth_date, a.date_of_death,
                   COUNT(b.id) AS book_count
            FROM author a
            LEFT JOIN book b ON b.author_id = a.id
            GROUP BY a.id, a.name, a.birth_date, a.date_of_death
            ORDER BY a.name COLLATE NOCASE, a.id
            "#,
        )
        .fetch_all(&mut *conn)
        .await?;
        Ok(rows)
    }

    /// Get author by ID
    pub async fn authors_get_by_id(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<Author> {
        self.authors_find_by_id(conn, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    pub async fn authors_find_by_id(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>("SELECT id, name, birth_date, date_of_death FROM author WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }

    /// First author with exactly this name
    pub async fn authors_find_by_name(&self, conn: &mut SqliteConnection, name: &str) -> AppResult<Option<Author>> {
        let row = sqlx::query_as::<_, Author>(
            "SELECT id, name, birth_date, date_of_death FROM author WHERE name = ? ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&mut *conn)
        .await?;
        Ok(row)
    }

    /// Create author
    pub async fn authors_create(&self, conn: &mut SqliteConnection, data: &NewAuthor) -> AppResult<Author> {
        sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO author (name, birth_date, date_of_death)
            VALUES (?, ?, ?)
            RETURNING id, name, birth_date, date_of_death
            "#,
        )
        .bind(&data.name)
        .bind(data.birth_date)
        .bind(data.date_of_death)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| map_write_error(e, || format!("Author '{}' already exists", data.name)))
    }

    /// Delete author
    pub async fn authors_delete(&self, conn: &mut SqliteConnection, id: i64) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM author WHERE id = ?")
            .bind(id)
            .execute(&mut *conn)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Author {} not found", id)));
        }
        Ok(())
    }
}
