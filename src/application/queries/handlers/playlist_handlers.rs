//! Playlist Query Handlers

use std::sync::Arc;

use super::likes::viewer_favorites;
use crate::application::cache::{CacheDomain, CacheKey, QueryCache};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    CommentRepositoryPort, FavoriteRepositoryPort, PlaylistDetailView, PlaylistFilter, PlaylistRecord,
    PlaylistRepositoryPort, PlaylistView,
};
use crate::application::queries::{
    GetPlaylistDetail, GetRecommendedPlaylists, ListPlaylistRecords, ListPlaylists,
};
use crate::application::recommendation::{PlaylistSource, Recommender};
use crate::domain::catalog::{CommentTarget, FavoriteKind, LikeStatus, Page, Pagination};
use crate::domain::recommendation::annotate_like_status;
use crate::domain::Identity;

/// ListPlaylists Handler
pub struct ListPlaylistsHandler {
    playlist_repo: Arc<dyn PlaylistRepositoryPort>,
    favorite_repo: Arc<dyn FavoriteRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl ListPlaylistsHandler {
    pub fn new(
        playlist_repo: Arc<dyn PlaylistRepositoryPort>,
        favorite_repo: Arc<dyn FavoriteRepositoryPort>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            playlist_repo,
            favorite_repo,
            cache,
        }
    }

    pub async fn handle(
        &self,
        query: ListPlaylists,
        viewer: Option<&Identity>,
    ) -> Result<Page<PlaylistView>, ApplicationError> {
        let page = Pagination::new(query.page_num, query.page_size)?;
        let filter = PlaylistFilter {
            title: query.title.clone(),
            style: query.style.clone(),
        };

        let mut result: Page<PlaylistView> = self
            .cache
            .read_through_query(
                &CacheDomain::Playlist.operation("getAllPlaylists"),
                &query,
                move || async move {
                    let result = self.playlist_repo.find_page(&filter, page).await?;
                    if result.is_empty() {
                        return Err(ApplicationError::not_found("Playlist"));
                    }
                    Ok(result)
                },
            )
            .await?;

        let favorites =
            viewer_favorites(self.favorite_repo.as_ref(), viewer, FavoriteKind::Playlist).await?;
        annotate_like_status(&mut result.items, &favorites);
        Ok(result)
    }
}

/// GetPlaylistDetail Handler
///
/// 歌单本身与其中歌曲各自按调用方的收藏填充标记
pub struct GetPlaylistDetailHandler {
    playlist_repo: Arc<dyn PlaylistRepositoryPort>,
    comment_repo: Arc<dyn CommentRepositoryPort>,
    favorite_repo: Arc<dyn FavoriteRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl GetPlaylistDetailHandler {
    pub fn new(
        playlist_repo: Arc<dyn PlaylistRepositoryPort>,
        comment_repo: Arc<dyn CommentRepositoryPort>,
        favorite_repo: Arc<dyn FavoriteRepositoryPort>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            playlist_repo,
            comment_repo,
            favorite_repo,
            cache,
        }
    }

    pub async fn handle(
        &self,
        query: GetPlaylistDetail,
        viewer: Option<&Identity>,
    ) -> Result<PlaylistDetailView, ApplicationError> {
        let playlist_id = query.playlist_id;
        let key = CacheKey::build(
            &CacheDomain::Playlist.operation("getPlaylistDetail"),
            &[&playlist_id],
        );

        let mut detail: PlaylistDetailView = self
            .cache
            .read_through(&key, move || async move {
                let mut detail = self
                    .playlist_repo
                    .find_detail(playlist_id)
                    .await?
                    .ok_or_else(|| ApplicationError::not_found("Playlist"))?;
                detail.comments = self
                    .comment_repo
                    .find_by_target(CommentTarget::Playlist(playlist_id))
                    .await?;
                Ok::<_, ApplicationError>(detail)
            })
            .await?;

        let liked_playlists =
            viewer_favorites(self.favorite_repo.as_ref(), viewer, FavoriteKind::Playlist).await?;
        detail.like_status = LikeStatus::from_liked(liked_playlists.contains(playlist_id));

        let liked_songs =
            viewer_favorites(self.favorite_repo.as_ref(), viewer, FavoriteKind::Song).await?;
        annotate_like_status(&mut detail.songs, &liked_songs);
        Ok(detail)
    }
}

/// GetRecommendedPlaylists Handler
pub struct GetRecommendedPlaylistsHandler {
    recommender: Recommender<PlaylistSource>,
}

impl GetRecommendedPlaylistsHandler {
    pub fn new(recommender: Recommender<PlaylistSource>) -> Self {
        Self { recommender }
    }

    pub async fn handle(
        &self,
        _query: GetRecommendedPlaylists,
        viewer: Option<&Identity>,
    ) -> Result<Vec<PlaylistView>, ApplicationError> {
        let playlists = self.recommender.recommend(viewer).await?;
        if playlists.is_empty() {
            return Err(ApplicationError::not_found("Playlist"));
        }
        Ok(playlists)
    }
}

/// ListPlaylistRecords Handler（管理端）
pub struct ListPlaylistRecordsHandler {
    playlist_repo: Arc<dyn PlaylistRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl ListPlaylistRecordsHandler {
    pub fn new(playlist_repo: Arc<dyn PlaylistRepositoryPort>, cache: Arc<QueryCache>) -> Self {
        Self {
            playlist_repo,
            cache,
        }
    }

    pub async fn handle(
        &self,
        query: ListPlaylistRecords,
    ) -> Result<Page<PlaylistRecord>, ApplicationError> {
        let page = Pagination::new(query.page_num, query.page_size)?;
        let filter = PlaylistFilter {
            title: query.title.clone(),
            style: query.style.clone(),
        };

        self.cache
            .read_through_query(
                &CacheDomain::Playlist.operation("getAllPlaylistsInfo"),
                &query,
                move || async move {
                    let result = self.playlist_repo.find_record_page(&filter, page).await?;
                    if result.is_empty() {
                        return Err(ApplicationError::not_found("Playlist"));
                    }
                    Ok(result)
                },
            )
            .await
    }
}
