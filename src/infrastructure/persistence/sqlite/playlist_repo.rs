//! SQLite Playlist Repository

use async_trait::async_trait;
use sqlx::{FromRow, QueryBuilder, Sqlite};

use super::song_repo::{song_views, SongViewRow, SONG_VIEW_SELECT};
use super::support::{db_error, filter_value, like_pattern, push_id_list, push_text_list};
use super::DbPool;
use crate::application::ports::{
    NewPlaylist, PlaylistDetailView, PlaylistFilter, PlaylistRecord, PlaylistRepositoryPort,
    PlaylistView, RepositoryError,
};
use crate::domain::catalog::{FavoriteKind, LikeStatus, Page, Pagination};

#[derive(FromRow)]
struct PlaylistViewRow {
    id: i64,
    title: String,
    cover_url: String,
}

impl From<PlaylistViewRow> for PlaylistView {
    fn from(row: PlaylistViewRow) -> Self {
        PlaylistView {
            playlist_id: row.id as u64,
            title: row.title,
            cover_url: row.cover_url,
            like_status: LikeStatus::Default,
        }
    }
}

#[derive(FromRow)]
struct PlaylistRow {
    id: i64,
    title: String,
    cover_url: String,
    introduction: String,
    style: String,
}

impl From<PlaylistRow> for PlaylistRecord {
    fn from(row: PlaylistRow) -> Self {
        PlaylistRecord {
            playlist_id: row.id as u64,
            title: row.title,
            cover_url: row.cover_url,
            introduction: row.introduction,
            style: row.style,
        }
    }
}

const PLAYLIST_ROW_SELECT: &str = "SELECT id, title, cover_url, introduction, style FROM playlists";

/// 公共列表的风格为精确匹配
fn push_playlist_filter(qb: &mut QueryBuilder<'_, Sqlite>, filter: &PlaylistFilter) {
    if let Some(title) = filter_value(&filter.title) {
        qb.push(" AND p.title LIKE ").push_bind(like_pattern(title));
    }
    if let Some(style) = filter_value(&filter.style) {
        qb.push(" AND p.style = ").push_bind(style.to_string());
    }
}

/// 收藏列表的风格为模糊匹配
fn push_favorite_filter(qb: &mut QueryBuilder<'_, Sqlite>, user_id: u64, filter: &PlaylistFilter) {
    qb.push(" WHERE f.user_id = ")
        .push_bind(user_id as i64)
        .push(" AND f.kind = ")
        .push_bind(FavoriteKind::Playlist.as_i64());
    if let Some(title) = filter_value(&filter.title) {
        qb.push(" AND p.title LIKE ").push_bind(like_pattern(title));
    }
    if let Some(style) = filter_value(&filter.style) {
        qb.push(" AND p.style LIKE ").push_bind(like_pattern(style));
    }
}

fn push_page(qb: &mut QueryBuilder<'_, Sqlite>, page: Pagination) {
    qb.push(" LIMIT ")
        .push_bind(page.limit() as i64)
        .push(" OFFSET ")
        .push_bind(page.offset() as i64);
}

/// SQLite Playlist Repository
pub struct SqlitePlaylistRepository {
    pool: DbPool,
}

impl SqlitePlaylistRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn count(&self, filter: &PlaylistFilter) -> Result<u64, RepositoryError> {
        let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM playlists p WHERE 1 = 1");
        push_playlist_filter(&mut count, filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(total as u64)
    }
}

#[async_trait]
impl PlaylistRepositoryPort for SqlitePlaylistRepository {
    async fn find_page(
        &self,
        filter: &PlaylistFilter,
        page: Pagination,
    ) -> Result<Page<PlaylistView>, RepositoryError> {
        let total = self.count(filter).await?;
        if total == 0 {
            return Ok(Page::empty());
        }

        let mut query =
            QueryBuilder::<Sqlite>::new("SELECT p.id, p.title, p.cover_url FROM playlists p WHERE 1 = 1");
        push_playlist_filter(&mut query, filter);
        query.push(" ORDER BY p.id DESC");
        push_page(&mut query, page);

        let rows: Vec<PlaylistViewRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(Page::new(total, rows.into_iter().map(PlaylistView::from).collect()))
    }

    async fn find_record_page(
        &self,
        filter: &PlaylistFilter,
        page: Pagination,
    ) -> Result<Page<PlaylistRecord>, RepositoryError> {
        let total = self.count(filter).await?;
        if total == 0 {
            return Ok(Page::empty());
        }

        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT p.id, p.title, p.cover_url, p.introduction, p.style FROM playlists p WHERE 1 = 1",
        );
        push_playlist_filter(&mut query, filter);
        query.push(" ORDER BY p.id DESC");
        push_page(&mut query, page);

        let rows: Vec<PlaylistRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(Page::new(total, rows.into_iter().map(PlaylistRecord::from).collect()))
    }

    async fn find_favorite_page(
        &self,
        user_id: u64,
        filter: &PlaylistFilter,
        page: Pagination,
    ) -> Result<Page<PlaylistView>, RepositoryError> {
        let mut count = QueryBuilder::<Sqlite>::new(
            "SELECT COUNT(*) FROM favorites f JOIN playlists p ON p.id = f.target_id",
        );
        push_favorite_filter(&mut count, user_id, filter);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        if total == 0 {
            return Ok(Page::empty());
        }

        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT p.id, p.title, p.cover_url FROM favorites f JOIN playlists p ON p.id = f.target_id",
        );
        push_favorite_filter(&mut query, user_id, filter);
        query.push(" ORDER BY f.created_at DESC, f.id DESC");
        push_page(&mut query, page);

        let rows: Vec<PlaylistViewRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(Page::new(
            total as u64,
            rows.into_iter().map(PlaylistView::from).collect(),
        ))
    }

    async fn find_detail(&self, id: u64) -> Result<Option<PlaylistDetailView>, RepositoryError> {
        let Some(playlist) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let songs: Vec<SongViewRow> = sqlx::query_as(&format!(
            "{} JOIN playlist_songs ps ON ps.song_id = s.id WHERE ps.playlist_id = ? ORDER BY s.id DESC",
            SONG_VIEW_SELECT
        ))
        .bind(id as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(Some(PlaylistDetailView {
            playlist_id: playlist.playlist_id,
            title: playlist.title,
            cover_url: playlist.cover_url,
            introduction: playlist.introduction,
            songs: song_views(songs)?,
            like_status: LikeStatus::Default,
            comments: Vec::new(),
        }))
    }

    async fn find_random(
        &self,
        limit: usize,
        exclude: &[u64],
    ) -> Result<Vec<PlaylistView>, RepositoryError> {
        let mut query =
            QueryBuilder::<Sqlite>::new("SELECT p.id, p.title, p.cover_url FROM playlists p WHERE 1 = 1");
        if !exclude.is_empty() {
            query.push(" AND p.id NOT IN ");
            push_id_list(&mut query, exclude);
        }
        query.push(" ORDER BY RANDOM() LIMIT ").push_bind(limit as i64);

        let rows: Vec<PlaylistViewRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(PlaylistView::from).collect())
    }

    async fn find_styles_by_ids(&self, ids: &[u64]) -> Result<Vec<String>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new("SELECT style FROM playlists WHERE id IN ");
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
    ) -> Result<Vec<PlaylistView>, RepositoryError> {
        if styles.is_empty() {
            return Ok(Vec::new());
        }

        let mut query =
            QueryBuilder::<Sqlite>::new("SELECT p.id, p.title, p.cover_url FROM playlists p WHERE p.style IN ");
        push_text_list(&mut query, styles);
        if !exclude.is_empty() {
            query.push(" AND p.id NOT IN ");
            push_id_list(&mut query, exclude);
        }
        query.push(" ORDER BY RANDOM() LIMIT ").push_bind(limit as i64);

        let rows: Vec<PlaylistViewRow> = query
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(PlaylistView::from).collect())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<PlaylistRecord>, RepositoryError> {
        let row: Option<PlaylistRow> =
            sqlx::query_as(&format!("{} WHERE id = ?", PLAYLIST_ROW_SELECT))
                .bind(id as i64)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(row.map(PlaylistRecord::from))
    }

    async fn find_by_title(&self, title: &str) -> Result<Option<PlaylistRecord>, RepositoryError> {
        let row: Option<PlaylistRow> =
            sqlx::query_as(&format!("{} WHERE title = ? LIMIT 1", PLAYLIST_ROW_SELECT))
                .bind(title)
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(row.map(PlaylistRecord::from))
    }

    async fn create(&self, playlist: &NewPlaylist) -> Result<u64, RepositoryError> {
        let result =
            sqlx::query("INSERT INTO playlists (title, introduction, style) VALUES (?, ?, ?)")
                .bind(&playlist.title)
                .bind(&playlist.introduction)
                .bind(&playlist.style)
                .execute(&self.pool)
                .await
                .map_err(db_error)?;

        Ok(result.last_insert_rowid() as u64)
    }

    async fn update(&self, playlist: &PlaylistRecord) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE playlists SET title = ?, cover_url = ?, introduction = ?, style = ? WHERE id = ?",
        )
        .bind(&playlist.title)
        .bind(&playlist.cover_url)
        .bind(&playlist.introduction)
        .bind(&playlist.style)
        .bind(playlist.playlist_id as i64)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Playlist {}",
                playlist.playlist_id
            )));
        }
        Ok(())
    }

    async fn update_cover(&self, id: u64, cover_url: &str) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE playlists SET cover_url = ? WHERE id = ?")
            .bind(cover_url)
            .bind(id as i64)
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn add_songs(&self, playlist_id: u64, song_ids: &[u64]) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        for song_id in song_ids {
            sqlx::query("INSERT OR IGNORE INTO playlist_songs (playlist_id, song_id) VALUES (?, ?)")
                .bind(playlist_id as i64)
                .bind(*song_id as i64)
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)?;
        Ok(())
    }

    async fn delete_by_ids(&self, ids: &[u64]) -> Result<u64, RepositoryError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(db_error)?;

        let mut bindings =
            QueryBuilder::<Sqlite>::new("DELETE FROM playlist_songs WHERE playlist_id IN ");
        push_id_list(&mut bindings, ids);
        bindings.build().execute(&mut *tx).await.map_err(db_error)?;

        let mut favorites =
            QueryBuilder::<Sqlite>::new("DELETE FROM favorites WHERE kind = 1 AND target_id IN ");
        push_id_list(&mut favorites, ids);
        favorites.build().execute(&mut *tx).await.map_err(db_error)?;

        let mut comments =
            QueryBuilder::<Sqlite>::new("DELETE FROM comments WHERE kind = 1 AND target_id IN ");
        push_id_list(&mut comments, ids);
        comments.build().execute(&mut *tx).await.map_err(db_error)?;

        let mut playlists = QueryBuilder::<Sqlite>::new("DELETE FROM playlists WHERE id IN ");
        push_id_list(&mut playlists, ids);
        let result = playlists.build().execute(&mut *tx).await.map_err(db_error)?;

        tx.commit().await.map_err(db_error)?;
        Ok(result.rows_affected())
    }

    async fn count_by_style(&self, style: Option<&str>) -> Result<u64, RepositoryError> {
        let filter = PlaylistFilter {
            title: None,
            style: style.map(str::to_string),
        };
        self.count(&filter).await
    }
}
