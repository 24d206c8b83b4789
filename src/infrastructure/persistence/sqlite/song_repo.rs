//! SQLite Song Repository

use async_trait::async_trait;
use sqlx::{FromRow, QueryBuilder, Sqlite};

use super::support::{
    db_error, filter_value, format_date, like_pattern, parse_date, push_id_list, push_text_list,
};
use super::DbPool;
use crate::application::ports::{
    ArtistSongFilter, NewSong, RepositoryError, SongAdminView, SongDetailView, SongFilter,
    SongRecord, SongRepositoryPort, SongView,
};
use crate::domain::catalog::{LikeStatus, Page, Pagination};

/// 歌曲列表投影（歌手名来自 LEFT JOIN）
pub(super) const SONG_VIEW_SELECT: &str = r#"
    SELECT s.id AS song_id, s.name AS song_name, COALESCE(a.name, '') AS artist_name,
           s.album, s.duration, s.cover_url, s.audio_url, s.release_time
    FROM songs s LEFT JOIN artists a ON a.id = s.artist_id
"#;

#[derive(FromRow)]
pub(super) struct SongViewRow {
    song_id: i64,
    song_name: String,
    artist_name: String,
    album: String,
    duration: String,
    cover_url: String,
    audio_url: String,
    release_time: Option<String>,
}

impl TryFrom<SongViewRow> for SongView {
    type Error = RepositoryError;

    fn try_from(row: SongViewRow) -> Result<Self, Self::Error> {
        Ok(SongView {
            song_id: row.song_id as u64,
            song_name: row.song_name,
            artist_name: row.artist_name,
            album: row.album,
            duration: row.duration,
            cover_url: row.cover_url,
            audio_url: row.audio_url,
            like_status: LikeStatus::Default,
            release_time: parse_date(row.release_time)?,
        })
    }
}

pub(super) fn song_views(rows: Vec<SongViewRow>) -> Result<Vec<SongView>, RepositoryError> {
    rows.into_iter().map(SongView::try_from).collect()
}

#[derive(FromRow)]
struct SongDetailRow {
    song_id: i64,
    song_name: String,
    artist_name: String,
    album: String,
    lyric: String,
    duration: String,
    cover_url: String,
    audio_url: String,
    release_time: Option<String>,
}

impl TryFrom<SongDetailRow> for SongDetailView {
    type Error = RepositoryError;

    fn try_from(row: SongDetailRow) -> Result<Self, Self::Error> {
        Ok(SongDetailView {
            song_id: row.song_id as u64,
            song_name: row.song_name,
            artist_name: row.artist_name,
            album: row.album,
            lyric: row.lyric,
            duration: row.duration,
            cover_url: row.cover_url,
            audio_url: row.audio_url,
            release_time: parse_date(row.release_time)?,
            like_status: LikeStatus::Default,
            comments: Vec::new(),
        })
    }
}

#[derive(FromRow)]
struct SongAdminRow {
    song_id: i64,
    artist_name: String,
    song_name: String,
    album: String,
    lyric: String,
    duration: String,
    style: String,
    cover_url: String,
    audio_url: String,
    release_time: Option<String>,
}

impl TryFrom<SongAdminRow> for SongAdminView {
    type Error = RepositoryError;

    fn try_from(row: SongAdminRow) -> Result<Self, Self::Error> {
        Ok(SongAdminView {
            song_id: row.song_id as u64,
            artist_name: row.artist_name,
            song_name: row.song_name,
            album: row.album,
            lyric: row.lyric,
            duration: row.duration,
            style: row.style,
            cover_url: row.cover_url,
            audio_url: row.audio_url,
            release_time: parse_date(row.release_time)?,
        })
    }
}

#[derive(FromRow)]
struct SongRow {
    id: i64,
    artist_id: i64,
    name: String,
    album: String,
    lyric: String,
    duration: String,
    style: String,
    cover_url: String,
    audio_url: String,
    release_time: Option<String>,
}

impl TryFrom<SongRow> for SongRecord {
    type Error = RepositoryError;

    fn try_from(row: SongRow) -> Result<Self, Self::Error> {
        Ok(SongRecord {
            id: row.id as u64,
            artist_id: row.artist_id as u64,
            name: row.name,
            album: row.album,
            lyric: row.lyric,
            duration: row.duration,
            style: row.style,
            cover_url: row.cover_url,
            audio_url: row.audio_url,
            release_time: parse_date(row.release_time)?,
        })
    }
}

/// 追加歌曲筛选条件，调用方已写入 `WHERE 1 = 1`
fn push_song_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &SongFilter) {
    if let Some(name) = filter_value(&filter.song_name) {
        qb.push(" AND s.name LIKE ").push_bind(like_pattern(name));
    }
    if let Some(artist) = filter_value(&filter.artist_name) {
        qb.push(" AND a.name LIKE ").push_bind(like_pattern(artist));
    }
    if let Some(album) = filter_value(&filter.album) {
        qb.push(" AND s.album LIKE ").push_bind(like_pattern(album));
    }
}

fn push_admin_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &ArtistSongFilter) {
    if let Some(artist_id) = filter.artist_id {
        qb.push(" AND s.artist_id = ").push_bind(artist_id as i64);
    }
    if let Some(name) = filter_value(&filter.song_name) {
        qb.push(" AND s.name LIKE ").push_bind(like_pattern(name));
    }
    if let Some(album) = filter_value(&filter.album) {
        qb.push(" AND s.album LIKE ").push_bind(like_pattern(album));
    }
}

fn push_page(qb: &mut QueryBuilder<'_, Sqlite>, page: Pagination) {
    qb.push(" LIMIT ")
        .push_bind(page.limit() as i64)
        .push(" OFFSET ")
        .push_bind(page.offset() as i64);
}

/// SQLite Song Repository
pub struct SqliteSongRepository {
    pool: DbPool,
}

impl SqliteSongRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// ids 为 None 表示不限范围
    async fn page_within(
        &self,
        ids: Option<&[u64]>,
        filter: &SongFilter,
        page: Pagination,
    ) -> Result<Page<SongView>, RepositoryError> {
        let mut count = QueryBuilder::<Sqlite>::new(
            "SELECT COUNT(*) FROM songs s LEFT JOIN artists a ON a.id = s.artist_id WHERE 1 = 1",
        );
        push_song_filter(&mut count, filter);
        if let Some(ids) = ids {
            count.push(" AND s.id IN ");
            push_id_list(&mut count, ids);
        }
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        if total == 0 {
            return Ok(Page::empty());
        }

        let mut query = QueryBuilder::<Sqlite>::new(SONG_VIEW_SELECT);
        query.push(" WHERE 1 = 1");
        push_song_filter(&mut query, filter);
        if let Some(ids) = ids {
            query.push(" AND s.id IN ");
            push_id_list(&mut query, ids);
        }
        query.push(" ORDER BY s.id DESC");
        push_page(&mut query, page);

        let rows: Vec<SongViewRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(Page::new(total as u64, song_views(rows)?))
    }
}

#[async_trait]
impl SongRepositoryPort for SqliteSongRepository {
    async fn find_page(
        &self,
        filter: &SongFilter,
        page: Pagination,
    ) -> Result<Page<SongView>, RepositoryError> {
        self.page_within(None, filter, page).await
    }

    async fn find_page_by_ids(
        &self,
        ids: &[u64],
        filter: &SongFilter,
        page: Pagination,
    ) -> Result<Page<SongView>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Page::empty());
        }
        self.page_within(Some(ids), filter, page).await
    }

    async fn find_admin_page(
        &self,
        filter: &ArtistSongFilter,
        page: Pagination,
    ) -> Result<Page<SongAdminView>, RepositoryError> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM songs s WHERE 1 = 1");
        push_admin_filter(&mut count, filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        if total == 0 {
            return Ok(Page::empty());
        }

        let mut query = QueryBuilder::<Sqlite>::new(
            r#"
            SELECT s.id AS song_id, COALESCE(a.name, '') AS artist_name, s.name AS song_name,
                   s.album, s.lyric, s.duration, s.style, s.cover_url, s.audio_url, s.release_time
            FROM songs s LEFT JOIN artists a ON a.id = s.artist_id
            WHERE 1 = 1
            "#,
        );
        push_admin_filter(&mut query, filter);
        query.push(" ORDER BY s.release_time DESC, s.id DESC");
        push_page(&mut query, page);

        let rows: Vec<SongAdminRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        let items = rows
            .into_iter()
            .map(SongAdminView::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(total as u64, items))
    }

    async fn find_detail(&self, id: u64) -> Result<Option<SongDetailView>, RepositoryError> {
        let row: Option<SongDetailRow> = sqlx::query_as(
            r#"
            SELECT s.id AS song_id, s.name AS song_name, COALESCE(a.name, '') AS artist_name,
                   s.album, s.lyric, s.duration, s.cover_url, s.audio_url, s.release_time
            FROM songs s LEFT JOIN artists a ON a.id = s.artist_id
            WHERE s.id = ?
            "#,
        )
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(SongDetailView::try_from).transpose()
    }

    async fn find_random(
        &self,
        limit: usize,
        exclude: &[u64],
    ) -> Result<Vec<SongView>, RepositoryError> {
        let mut query = QueryBuilder::<Sqlite>::new(SONG_VIEW_SELECT);
        query.push(" WHERE 1 = 1");
        if !exclude.is_empty() {
            query.push(" AND s.id NOT IN ");
            push_id_list(&mut query, exclude);
        }
        query.push(" ORDER BY RANDOM() LIMIT ").push_bind(limit as i64);

        let rows: Vec<SongViewRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        song_views(rows)
    }

    async fn find_styles_by_ids(&self, ids: &[u64]) -> Result<Vec<String>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new("SELECT style FROM songs WHERE id IN ");
        push_id_list(&mut query, ids);

        query
            .build_query_scalar()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)
    }

    async fn find_by_styles(
        &self,
        styles: &[String],
        exclude: &[u64],
        limit: usize,
    ) -> Result<Vec<SongView>, RepositoryError> {
        if styles.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new(SONG_VIEW_SELECT);
        query.push(" WHERE s.style IN ");
        push_text_list(&mut query, styles);
        if !exclude.is_empty() {
            query.push(" AND s.id NOT IN ");
            push_id_list(&mut query, exclude);
        }
        query.push(" ORDER BY RANDOM() LIMIT ").push_bind(limit as i64);

        let rows: Vec<SongViewRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        song_views(rows)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<SongRecord>, RepositoryError> {
        let row: Option<SongRow> = sqlx::query_as(
            r#"
            SELECT id, artist_id, name, album, lyric, duration, style, cover_url, audio_url, release_time
            FROM songs WHERE id = ?
            "#,
        )
        .bind(id as i64)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(SongRecord::try_from).transpose()
    }

    async fn create(&self, song: &NewSong) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r#"
            INSERT INTO songs (artist_id, name, album, lyric, duration, style, release_time)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(song.artist_id as i64)
        .bind(&song.name)
        .bind(&song.album)
        .bind(&song.lyric)
        .bind(&song.duration)
        .bind(&song.style)
        .bind(format_date(song.release_time))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(result.last_insert_rowid() as u64)
    }

    async fn update(&self, song: &SongRecord) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE songs SET
                artist_id = ?, name = ?, album = ?, lyric = ?, duration = ?,
                style = ?, cover_url = ?, audio_url = ?, release_time = ?
            WHERE id = ?
            "#,
        )
        .bind(song.artist_id as i64)
        .bind(&song.name)
        .bind(&song.album)
        .bind(&song.lyric)
        .bind(&song.duration)
        .bind(&song.style)
        .bind(&song.cover_url)
        .bind(&song.audio_url)
        .bind(format_date(song.release_time))
        .bind(song.id as i64)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Song {}", song.id)));
        }
        Ok(())
    }

    async fn update_cover(&self, id: u64, cover_url: &str) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE songs SET cover_url = ? WHERE id = ?")
            .bind(cover_url)
            .bind(id as i64)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn update_audio(
        &self,
        id: u64,
        audio_url: &str,
        duration: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE songs SET audio_url = ?, duration = ? WHERE id = ?")
            .bind(audio_url)
            .bind(duration)
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

        let mut tx = self.pool.begin().await.map_err(db_error)?;

        // 歌单绑定、收藏与评论一并清理
        let mut bindings = QueryBuilder::<Sqlite>::new("DELETE FROM playlist_songs WHERE song_id IN ");
        push_id_list(&mut bindings, ids);
        bindings.build().execute(&mut *tx).await.map_err(db_error)?;

        let mut favorites =
            QueryBuilder::<Sqlite>::new("DELETE FROM favorites WHERE kind = 0 AND target_id IN ");
        push_id_list(&mut favorites, ids);
        favorites.build().execute(&mut *tx).await.map_err(db_error)?;

        let mut comments =
            QueryBuilder::<Sqlite>::new("DELETE FROM comments WHERE kind = 0 AND target_id IN ");
        push_id_list(&mut comments, ids);
        comments.build().execute(&mut *tx).await.map_err(db_error)?;

        let mut songs = QueryBuilder::<Sqlite>::new("DELETE FROM songs WHERE id IN ");
        push_id_list(&mut songs, ids);
        let result = songs.build().execute(&mut *tx).await.map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        Ok(result.rows_affected())
    }

    async fn count_by_style(&self, style: Option<&str>) -> Result<u64, RepositoryError> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM songs WHERE 1 = 1");
        if let Some(style) = style.map(str::trim).filter(|s| !s.is_empty()) {
            count.push(" AND style LIKE ").push_bind(like_pattern(style));
        }
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(total as u64)
    }
}
