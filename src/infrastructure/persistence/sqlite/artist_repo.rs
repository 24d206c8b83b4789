//! SQLite Artist Repository

use async_trait::async_trait;
use sqlx::{FromRow, QueryBuilder, Sqlite};

use super::song_repo::{song_views, SongViewRow, SONG_VIEW_SELECT};
use super::support::{db_error, filter_value, format_date, like_pattern, parse_date, push_id_list};
use super::DbPool;
use crate::application::ports::{
    ArtistDetailView, ArtistFilter, ArtistNameView, ArtistRecord, ArtistRepositoryPort,
    ArtistView, NewArtist, RepositoryError,
};
use crate::domain::catalog::{Gender, Page, Pagination};

#[derive(FromRow)]
struct ArtistViewRow {
    id: i64,
    name: String,
    avatar: String,
}

impl From<ArtistViewRow> for ArtistView {
    fn from(row: ArtistViewRow) -> Self {
        ArtistView {
            artist_id: row.id as u64,
            artist_name: row.name,
            avatar: row.avatar,
        }
    }
}

#[derive(FromRow)]
struct ArtistRow {
    id: i64,
    name: String,
    gender: i64,
    avatar: String,
    birth: Option<String>,
    area: String,
    introduction: String,
}

fn gender_from_db(value: i64) -> Result<Gender, RepositoryError> {
    u8::try_from(value)
        .ok()
        .and_then(|v| Gender::try_from(v).ok())
        .ok_or_else(|| RepositoryError::SerializationError(format!("invalid gender: {}", value)))
}

impl TryFrom<ArtistRow> for ArtistRecord {
    type Error = RepositoryError;

    fn try_from(row: ArtistRow) -> Result<Self, Self::Error> {
        Ok(ArtistRecord {
            artist_id: row.id as u64,
            artist_name: row.name,
            gender: gender_from_db(row.gender)?,
            avatar: row.avatar,
            birth: parse_date(row.birth)?,
            area: row.area,
            introduction: row.introduction,
        })
    }
}

fn push_artist_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &ArtistFilter) {
    if let Some(name) = filter_value(&filter.artist_name) {
        qb.push(" AND name LIKE ").push_bind(like_pattern(name));
    }
    if let Some(gender) = filter.gender {
        qb.push(" AND gender = ").push_bind(u8::from(gender) as i64);
    }
    if let Some(area) = filter_value(&filter.area) {
        qb.push(" AND area LIKE ").push_bind(like_pattern(area));
    }
}

/// SQLite Artist Repository
pub struct SqliteArtistRepository {
    pool: DbPool,
}

impl SqliteArtistRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArtistRepositoryPort for SqliteArtistRepository {
    async fn find_page(
        &self,
        filter: &ArtistFilter,
        page: Pagination,
    ) -> Result<Page<ArtistView>, RepositoryError> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM artists WHERE 1 = 1");
        push_artist_filter(&mut count, filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        if total == 0 {
            return Ok(Page::empty());
        }

        let mut query =
            QueryBuilder::<Sqlite>::new("SELECT id, name, avatar FROM artists WHERE 1 = 1");
        push_artist_filter(&mut query, filter);
        query
            .push(" ORDER BY id DESC LIMIT ")
            .push_bind(page.limit() as i64)
            .push(" OFFSET ")
            .push_bind(page.offset() as i64);

        let rows: Vec<ArtistViewRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(Page::new(
            total as u64,
            rows.into_iter().map(ArtistView::from).collect(),
        ))
    }

    async fn find_names(&self) -> Result<Vec<ArtistNameView>, RepositoryError> {
        let rows: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM artists ORDER BY id DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| ArtistNameView {
                artist_id: id as u64,
                artist_name: name,
            })
            .collect())
    }

    async fn find_random(&self, limit: usize) -> Result<Vec<ArtistView>, RepositoryError> {
        let rows: Vec<ArtistViewRow> =
            sqlx::query_as("SELECT id, name, avatar FROM artists ORDER BY RANDOM() LIMIT ?")
                .bind(limit as i64)
                .fetch_all(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(rows.into_iter().map(ArtistView::from).collect())
    }

    async fn find_detail(&self, id: u64) -> Result<Option<ArtistDetailView>, RepositoryError> {
        let Some(artist) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let songs: Vec<SongViewRow> = sqlx::query_as(&format!(
            "{} WHERE s.artist_id = ? ORDER BY s.id DESC",
            SONG_VIEW_SELECT
        ))
        .bind(id as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(Some(ArtistDetailView {
            artist_id: artist.artist_id,
            artist_name: artist.artist_name,
            gender: artist.gender,
            avatar: artist.avatar,
            birth: artist.birth,
            area: artist.area,
            introduction: artist.introduction,
            songs: song_views(songs)?,
        }))
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<ArtistRecord>, RepositoryError> {
        let row: Option<ArtistRow> = sqlx::query_as(
            "SELECT id, name, gender, avatar, birth, area, introduction FROM artists WHERE id = ?",
        )
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(ArtistRecord::try_from).transpose()
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artists WHERE name = ?")
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(count > 0)
    }

    async fn create(&self, artist: &NewArtist) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO artists (name, gender, birth, area, introduction) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&artist.name)
        .bind(u8::from(artist.gender) as i64)
        .bind(format_date(artist.birth))
        .bind(&artist.area)
        .bind(&artist.introduction)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(result.last_insert_rowid() as u64)
    }

    async fn update(&self, artist: &ArtistRecord) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE artists SET name = ?, gender = ?, avatar = ?, birth = ?, area = ?, introduction = ?
            WHERE id = ?
            "#,
        )
        .bind(&artist.artist_name)
        .bind(u8::from(artist.gender) as i64)
        .bind(&artist.avatar)
        .bind(format_date(artist.birth))
        .bind(&artist.area)
        .bind(&artist.introduction)
        .bind(artist.artist_id as i64)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Artist {}",
                artist.artist_id
            )));
        }
        Ok(())
    }

    async fn update_avatar(&self, id: u64, avatar_url: &str) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE artists SET avatar = ? WHERE id = ?")
            .bind(avatar_url)
            .bind(id as i64)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn delete_by_ids(&self, ids: &[u64]) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut query = QueryBuilder::<Sqlite>::new("DELETE FROM artists WHERE id IN ");
        push_id_list(&mut query, ids);
        let result = query.build().execute(&self.pool).await.map_err(db_error)?;

        Ok(result.rows_affected())
    }

    async fn count(
        &self,
        gender: Option<Gender>,
        area: Option<&str>,
    ) -> Result<u64, RepositoryError> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM artists WHERE 1 = 1");
        if let Some(gender) = gender {
            count.push(" AND gender = ").push_bind(u8::from(gender) as i64);
        }
        if let Some(area) = area.map(str::trim).filter(|a| !a.is_empty()) {
            count.push(" AND area = ").push_bind(area.to_string());
        }
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(total as u64)
    }
}
