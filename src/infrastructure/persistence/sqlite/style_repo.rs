//! SQLite Style Repository

use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use super::support::{db_error, push_id_list, push_text_list};
use super::DbPool;
use crate::application::ports::{RepositoryError, StyleRepositoryPort};

/// SQLite Style Repository
pub struct SqliteStyleRepository {
    pool: DbPool,
}

impl SqliteStyleRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StyleRepositoryPort for SqliteStyleRepository {
    async fn find_ids_by_names(&self, names: &[String]) -> Result<Vec<u64>, RepositoryError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new("SELECT id FROM styles WHERE name IN ");
        push_text_list(&mut query, names);
        query.push(" ORDER BY id");

        let ids: Vec<i64> = query
            .build_query_scalar()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(ids.into_iter().map(|id| id as u64).collect())
    }

    async fn replace_song_genres(
        &self,
        song_id: u64,
        style_ids: &[u64],
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query("DELETE FROM genres WHERE song_id = ?")
            .bind(song_id as i64)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        for style_id in style_ids {
            sqlx::query("INSERT OR IGNORE INTO genres (song_id, style_id) VALUES (?, ?)")
                .bind(song_id as i64)
                .bind(*style_id as i64)
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)?;
        Ok(())
    }

    async fn delete_genres_by_song_ids(&self, song_ids: &[u64]) -> Result<(), RepositoryError> {
        if song_ids.is_empty() {
            return Ok(());
        }

        let mut query = QueryBuilder::<Sqlite>::new("DELETE FROM genres WHERE song_id IN ");
        push_id_list(&mut query, song_ids);
        query.build().execute(&self.pool).await.map_err(db_error)?;
        Ok(())
    }
}
