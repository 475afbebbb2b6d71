//! Beer repository
//!
//! Handles catalog CRUD with:
//! - Zero-id rejection on update/delete before any transaction is opened
//! - Explicit rollback when the write statement fails
//! - Update/delete of an absent id committing as a no-op

use async_trait::async_trait;
use sqlx::sqlite::SqliteQueryResult;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::models::{Beer, ValidationError};

const BEER_SELECT_SQL: &str = "SELECT id, name, type, style FROM beer";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error, one variant per failure kind callers branch on
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("beer not found: {id}")]
    NotFound { id: i64 },

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Persistence contract consumed by the HTTP layer.
///
/// Implementations hold no request state of their own; concurrent callers
/// are coordinated by the store.
#[async_trait]
pub trait BeerRepository: Send + Sync {
    /// All beers in storage order. Empty when the catalog is empty.
    async fn list(&self) -> RepoResult<Vec<Beer>>;

    /// Returns `Err(RepoError::NotFound)` if no beer has this id.
    async fn get(&self, id: i64) -> RepoResult<Beer>;

    /// Insert a beer and return its stored id.
    ///
    /// A zero id is replaced by a store-assigned one. A duplicate id fails
    /// with `RepoError::Storage` and nothing is written.
    async fn create(&self, beer: &Beer) -> RepoResult<i64>;

    /// Replace name, type and style of the beer with the same id.
    ///
    /// Succeeds without effect when no beer has this id.
    async fn update(&self, beer: &Beer) -> RepoResult<()>;

    /// Delete a beer. Succeeds without effect when no beer has this id.
    async fn delete(&self, id: i64) -> RepoResult<()>;
}

/// SQLite-backed beer repository
#[derive(Debug, Clone)]
pub struct SqliteBeerRepo {
    pool: SqlitePool,
}

impl SqliteBeerRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl BeerRepository for SqliteBeerRepo {
    async fn list(&self) -> RepoResult<Vec<Beer>> {
        let beers = sqlx::query_as::<_, Beer>(BEER_SELECT_SQL)
            .fetch_all(&self.pool)
            .await?;

        Ok(beers)
    }

    async fn get(&self, id: i64) -> RepoResult<Beer> {
        let beer = sqlx::query_as::<_, Beer>(&format!("{BEER_SELECT_SQL} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepoError::NotFound { id })?;

        Ok(beer)
    }

    async fn create(&self, beer: &Beer) -> RepoResult<i64> {
        let preset_id = (beer.id != 0).then_some(beer.id);

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("INSERT INTO beer (id, name, type, style) VALUES (?1, ?2, ?3, ?4)")
            .bind(preset_id)
            .bind(beer.name.as_str())
            .bind(beer.kind)
            .bind(beer.style)
            .execute(&mut *tx)
            .await;

        let id = commit_or_rollback(tx, result).await?.last_insert_rowid();
        tracing::debug!(id, name = %beer.name, "beer created");
        Ok(id)
    }

    async fn update(&self, beer: &Beer) -> RepoResult<()> {
        if beer.id == 0 {
            return Err(ValidationError::Unassigned { field: "id" }.into());
        }

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("UPDATE beer SET name = ?1, type = ?2, style = ?3 WHERE id = ?4")
            .bind(beer.name.as_str())
            .bind(beer.kind)
            .bind(beer.style)
            .bind(beer.id)
            .execute(&mut *tx)
            .await;

        let done = commit_or_rollback(tx, result).await?;
        tracing::debug!(id = beer.id, rows = done.rows_affected(), "beer updated");
        Ok(())
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        if id == 0 {
            return Err(ValidationError::Unassigned { field: "id" }.into());
        }

        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("DELETE FROM beer WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await;

        let done = commit_or_rollback(tx, result).await?;
        tracing::debug!(id, rows = done.rows_affected(), "beer deleted");
        Ok(())
    }
}

/// Commit when the statement succeeded, roll back otherwise.
///
/// On statement failure the statement error is returned even if the
/// rollback itself fails.
async fn commit_or_rollback(
    tx: Transaction<'_, Sqlite>,
    result: Result<SqliteQueryResult, sqlx::Error>,
) -> RepoResult<SqliteQueryResult> {
    match result {
        Ok(done) => {
            tx.commit().await?;
            Ok(done)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(error = %rollback_err, "rollback failed");
            }
            Err(err.into())
        }
    }
}
