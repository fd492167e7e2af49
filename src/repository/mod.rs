//! Repository layer for database operations
//!
//! Every query method takes the connection it runs on, so the service layer
//! decides whether a call happens on a plain pooled connection or inside a
//! transaction. Connections are returned to the pool when dropped.

pub mod authors;
pub mod books;

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sqlx::{
    pool::PoolConnection,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Pool, Sqlite, Transaction,
};

use crate::{
    config::DatabaseConfig,
    error::{AppError, AppResult},
};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Sqlite>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Open the database described by `config` and bring its schema up to date
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_millis(config.busy_timeout_ms));

        let in_memory = config.url.contains(":memory:");
        if !in_memory {
            let dir = database_file(&config.url).and_then(|f| f.parent().map(Path::to_path_buf));
            if let Some(dir) = dir.filter(|d| !d.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(&dir)
                    .await
                    .map_err(|e| AppError::Internal(format!("Failed to create {}: {}", dir.display(), e)))?;
            }
        }

        // SQLite takes one writer at a time and a deferred transaction that
        // loses the race for the write lock fails with SQLITE_BUSY instead of
        // waiting. A single connection queues every session in the pool.
        let mut pool_options = SqlitePoolOptions::new().max_connections(1).min_connections(1);

        // An in-memory database lives as long as its connection.
        if in_memory {
            pool_options = pool_options
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
        }

        let pool = pool_options.connect_with(options).await?;
        tracing::info!("Connected to database {}", config.url);

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to run database migrations: {}", e)))?;
        tracing::info!("Database migrations completed");

        Ok(Self::new(pool))
    }

    /// Check out a connection for the duration of one operation
    pub async fn acquire(&self) -> AppResult<PoolConnection<Sqlite>> {
        Ok(self.pool.acquire().await?)
    }

    /// Start a transaction; it rolls back unless committed
    pub async fn begin(&self) -> AppResult<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }

    /// Readiness check
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// File behind a `sqlite:` URL, without query parameters
fn database_file(url: &str) -> Option<PathBuf> {
    let rest = url.strip_prefix("sqlite://").or_else(|| url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    if path.is_empty() || path.starts_with(":memory:") {
        return None;
    }
    Some(PathBuf::from(path))
}

/// Map constraint violations raised by a write into domain errors
pub(crate) fn map_write_error(e: sqlx::Error, conflict: impl FnOnce() -> String) -> AppError {
    match &e {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::Conflict(conflict()),
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            AppError::Validation("Referenced author does not exist".to_string())
        }
        _ => AppError::Database(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_file() {
        assert_eq!(database_file("sqlite://data/library.sqlite"), Some(PathBuf::from("data/library.sqlite")));
        assert_eq!(database_file("sqlite:catalog.db?mode=rwc"), Some(PathBuf::from("catalog.db")));
        assert_eq!(database_file("sqlite::memory:"), None);
        assert_eq!(database_file("postgres://localhost/db"), None);
    }
}
