//! Song Query Handlers
//!
//! 列表与详情走 Read-Through 缓存，缓存里不带收藏标记，
//! 读出后再按调用方填充

use std::sync::Arc;

use super::likes::viewer_favorites;
use crate::application::cache::{CacheDomain, CacheKey, QueryCache};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ArtistSongFilter, CommentRepositoryPort, FavoriteRepositoryPort, SongAdminView,
    SongDetailView, SongFilter, SongRepositoryPort, SongView,
};
use crate::application::queries::{GetRecommendedSongs, GetSongDetail, ListSongs, ListSongsByArtist};
use crate::application::recommendation::{Recommender, SongSource};
use crate::domain::catalog::{CommentTarget, FavoriteKind, LikeStatus, Page, Pagination};
use crate::domain::recommendation::annotate_like_status;
use crate::domain::Identity;

/// ListSongs Handler
pub struct ListSongsHandler {
    song_repo: Arc<dyn SongRepositoryPort>,
    favorite_repo: Arc<dyn FavoriteRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl ListSongsHandler {
    pub fn new(
        song_repo: Arc<dyn SongRepositoryPort>,
        favorite_repo: Arc<dyn FavoriteRepositoryPort>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            song_repo,
            favorite_repo,
            cache,
        }
    }

    pub async fn handle(
        &self,
        query: ListSongs,
        viewer: Option<&Identity>,
    ) -> Result<Page<SongView>, ApplicationError> {
        let page = Pagination::new(query.page_num, query.page_size)?;
        let filter = SongFilter {
            song_name: query.song_name.clone(),
            artist_name: query.artist_name.clone(),
            album: query.album.clone(),
        };

        let mut result: Page<SongView> = self
            .cache
            .read_through_query(
                &CacheDomain::Song.operation("getAllSongs"),
                &query,
                move || async move {
                    let result = self.song_repo.find_page(&filter, page).await?;
                    if result.is_empty() {
                        return Err(ApplicationError::not_found("Song"));
                    }
                    Ok(result)
                },
            )
            .await?;

        let favorites =
            viewer_favorites(self.favorite_repo.as_ref(), viewer, FavoriteKind::Song).await?;
        annotate_like_status(&mut result.items, &favorites);
        Ok(result)
    }
}

/// GetSongDetail Handler
///
/// 评论随详情一起缓存
pub struct GetSongDetailHandler {
    song_repo: Arc<dyn SongRepositoryPort>,
    comment_repo: Arc<dyn CommentRepositoryPort>,
    favorite_repo: Arc<dyn FavoriteRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl GetSongDetailHandler {
    pub fn new(
        song_repo: Arc<dyn SongRepositoryPort>,
        comment_repo: Arc<dyn CommentRepositoryPort>,
        favorite_repo: Arc<dyn FavoriteRepositoryPort>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            song_repo,
            comment_repo,
            favorite_repo,
            cache,
        }
    }

    pub async fn handle(
        &self,
        query: GetSongDetail,
        viewer: Option<&Identity>,
    ) -> Result<SongDetailView, ApplicationError> {
        let song_id = query.song_id;
        let key = CacheKey::build(&CacheDomain::Song.operation("getSongDetail"), &[&song_id]);

        let mut detail: SongDetailView = self
            .cache
            .read_through(&key, move || async move {
                let mut detail = self
                    .song_repo
                    .find_detail(song_id)
                    .await?
                    .ok_or_else(|| ApplicationError::not_found("Song"))?;
                detail.comments = self
                    .comment_repo
                    .find_by_target(CommentTarget::Song(song_id))
                    .await?;
                Ok::<_, ApplicationError>(detail)
            })
            .await?;

        let favorites =
            viewer_favorites(self.favorite_repo.as_ref(), viewer, FavoriteKind::Song).await?;
        detail.like_status = LikeStatus::from_liked(favorites.contains(song_id));
        Ok(detail)
    }
}

/// GetRecommendedSongs Handler（不缓存）
pub struct GetRecommendedSongsHandler {
    recommender: Recommender<SongSource>,
}

impl GetRecommendedSongsHandler {
    pub fn new(recommender: Recommender<SongSource>) -> Self {
        Self { recommender }
    }

    pub async fn handle(
        &self,
        _query: GetRecommendedSongs,
        viewer: Option<&Identity>,
    ) -> Result<Vec<SongView>, ApplicationError> {
        let songs = self.recommender.recommend(viewer).await?;
        if songs.is_empty() {
            return Err(ApplicationError::not_found("Song"));
        }
        Ok(songs)
    }
}

/// ListSongsByArtist Handler（管理端）
pub struct ListSongsByArtistHandler {
    song_repo: Arc<dyn SongRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl ListSongsByArtistHandler {
    pub fn new(song_repo: Arc<dyn SongRepositoryPort>, cache: Arc<QueryCache>) -> Self {
        Self { song_repo, cache }
    }

    pub async fn handle(
        &self,
        query: ListSongsByArtist,
    ) -> Result<Page<SongAdminView>, ApplicationError> {
        let page = Pagination::new(query.page_num, query.page_size)?;
        let filter = ArtistSongFilter {
            artist_id: query.artist_id,
            song_name: query.song_name.clone(),
            album: query.album.clone(),
        };

        self.cache
            .read_through_query(
                &CacheDomain::Song.operation("getAllSongsByArtist"),
                &query,
                move || async move {
                    let result = self.song_repo.find_admin_page(&filter, page).await?;
                    if result.is_empty() {
                        return Err(ApplicationError::not_found("Song"));
                    }
                    Ok(result)
                },
            )
            .await
    }
}
