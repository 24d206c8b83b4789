//! SQLite Favorite Repository

use async_trait::async_trait;
use chrono::Utc;

use super::support::db_error;
use super::DbPool;
use crate::application::ports::{FavoriteRepositoryPort, RepositoryError};
use crate::domain::catalog::{FavoriteKind, FavoriteTarget};

/// SQLite Favorite Repository
pub struct SqliteFavoriteRepository {
    pool: DbPool,
}

impl SqliteFavoriteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FavoriteRepositoryPort for SqliteFavoriteRepository {
    async fn find_ids(&self, user_id: u64, kind: FavoriteKind) -> Result<Vec<u64>, RepositoryError> {
        let ids: Vec<i64> = sqlx::query_scalar(
            "SELECT target_id FROM favorites WHERE user_id = ? AND kind = ? ORDER BY target_id ASC",
        )
        .bind(user_id as i64)
        .bind(kind.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(ids.into_iter().map(|id| id as u64).collect())
    }

    async fn exists(&self, user_id: u64, target: FavoriteTarget) -> Result<bool, RepositoryError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM favorites WHERE user_id = ? AND kind = ? AND target_id = ?",
        )
        .bind(user_id as i64)
        .bind(target.kind().as_i64())
        .bind(target.id() as i64)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(count > 0)
    }

    async fn add(&self, user_id: u64, target: FavoriteTarget) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "INSERT OR IGNORE INTO favorites (user_id, kind, target_id, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id as i64)
        .bind(target.kind().as_i64())
        .bind(target.id() as i64)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::Duplicate(format!(
                "Favorite {:?} of user {}",
                target, user_id
            )));
        }
        Ok(())
    }

    async fn remove(&self, user_id: u64, target: FavoriteTarget) -> Result<bool, RepositoryError> {
        let result =
            sqlx::query("DELETE FROM favorites WHERE user_id = ? AND kind = ? AND target_id = ?")
                .bind(user_id as i64)
                .bind(target.kind().as_i64())
                .bind(target.id() as i64)
                .execute(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_user(&self, user_id: u64) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM favorites WHERE user_id = ?")
            .bind(user_id as i64)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }
}
