//! SQLite Banner Repository

use async_trait::async_trait;
use sqlx::{FromRow, QueryBuilder, Sqlite};

use super::support::{db_error, push_id_list};
use super::DbPool;
use crate::application::ports::{
    BannerAdminView, BannerRecord, BannerRepositoryPort, BannerView, RepositoryError,
};
use crate::domain::catalog::{BannerStatus, Page, Pagination};

#[derive(FromRow)]
struct BannerRow {
    id: i64,
    banner_url: String,
    status: i64,
}

impl TryFrom<BannerRow> for BannerRecord {
    type Error = RepositoryError;

    fn try_from(row: BannerRow) -> Result<Self, Self::Error> {
        let status = u8::try_from(row.status)
            .ok()
            .and_then(|v| BannerStatus::try_from(v).ok())
            .ok_or_else(|| {
                RepositoryError::SerializationError(format!("invalid banner status: {}", row.status))
            })?;

        Ok(BannerRecord {
            id: row.id as u64,
            banner_url: row.banner_url,
            status,
        })
    }
}

impl From<BannerRecord> for BannerAdminView {
    fn from(record: BannerRecord) -> Self {
        BannerAdminView {
            banner_id: record.id,
            banner_url: record.banner_url,
            status: record.status,
        }
    }
}

fn push_status_filter(qb: &mut QueryBuilder<'_, Sqlite>, status: Option<BannerStatus>) {
    if let Some(status) = status {
        qb.push(" AND status = ").push_bind(u8::from(status) as i64);
    }
}

/// SQLite Banner Repository
pub struct SqliteBannerRepository {
    pool: DbPool,
}

impl SqliteBannerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BannerRepositoryPort for SqliteBannerRepository {
    async fn find_enabled(&self) -> Result<Vec<BannerView>, RepositoryError> {
        let rows: Vec<(i64, String)> =
            sqlx::query_as("SELECT id, banner_url FROM banners WHERE status = ? ORDER BY id DESC")
                .bind(u8::from(BannerStatus::Enabled) as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|(id, banner_url)| BannerView {
                banner_id: id as u64,
                banner_url,
            })
            .collect())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<BannerRecord>, RepositoryError> {
        let row: Option<BannerRow> =
            sqlx::query_as("SELECT id, banner_url, status FROM banners WHERE id = ?")
                .bind(id as i64)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        row.map(BannerRecord::try_from).transpose()
    }

    async fn create(&self, banner_url: &str) -> Result<u64, RepositoryError> {
        let result = sqlx::query("INSERT INTO banners (banner_url, status) VALUES (?, ?)")
            .bind(banner_url)
            .bind(u8::from(BannerStatus::Enabled) as i64)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.last_insert_rowid() as u64)
    }

    async fn find_page(
        &self,
        status: Option<BannerStatus>,
        page: Pagination,
    ) -> Result<Page<BannerAdminView>, RepositoryError> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM banners WHERE 1 = 1");
        push_status_filter(&mut count, status);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        if total == 0 {
            return Ok(Page::empty());
        }

        let mut query =
            QueryBuilder::<Sqlite>::new("SELECT id, banner_url, status FROM banners WHERE 1 = 1");
        push_status_filter(&mut query, status);
        query
            .push(" ORDER BY id DESC LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let rows: Vec<BannerRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        let items = rows
            .into_iter()
            .map(|row| BannerRecord::try_from(row).map(BannerAdminView::from))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Page::new(total as u64, items))
    }

    async fn find_by_ids(&self, ids: &[u64]) -> Result<Vec<BannerRecord>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query =
            QueryBuilder::<Sqlite>::new("SELECT id, banner_url, status FROM banners WHERE id IN ");
        push_id_list(&mut query, ids);

        let rows: Vec<BannerRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        rows.into_iter().map(BannerRecord::try_from).collect()
    }

    async fn update_url(&self, id: u64, banner_url: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE banners SET banner_url = ? WHERE id = ?")
            .bind(banner_url)
            .bind(id as i64)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Banner {}", id)));
        }
        Ok(())
    }

    async fn update_status(&self, id: u64, status: BannerStatus) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE banners SET status = ? WHERE id = ?")
            .bind(u8::from(status) as i64)
            .bind(id as i64)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Banner {}", id)));
        }
        Ok(())
    }

    async fn delete_by_ids(&self, ids: &[u64]) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut query = QueryBuilder::<Sqlite>::new("DELETE FROM banners WHERE id IN ");
        push_id_list(&mut query, ids);
        let result = query.build().execute(&self.pool).await.map_err(db_error)?;

        Ok(result.rows_affected())
    }
}
