//! Favorite Query Handlers
//!
//! 收藏列表里的条目全部标记为已收藏

use std::sync::Arc;

use crate::application::cache::{CacheDomain, QueryCache};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    FavoriteRepositoryPort, PlaylistFilter, PlaylistRepositoryPort, PlaylistView, SongFilter,
    SongRepositoryPort, SongView,
};
use crate::application::queries::{ListFavoritePlaylists, ListFavoriteSongs};
use crate::domain::catalog::{FavoriteKind, LikeStatus, Page, Pagination};
use crate::domain::recommendation::Recommendable;

fn mark_all_liked<T: Recommendable>(items: &mut [T]) {
    for item in items.iter_mut() {
        item.set_like_status(LikeStatus::Liked);
    }
}

/// ListFavoriteSongs Handler
pub struct ListFavoriteSongsHandler {
    song_repo: Arc<dyn SongRepositoryPort>,
    favorite_repo: Arc<dyn FavoriteRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl ListFavoriteSongsHandler {
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

    pub async fn handle(&self, query: ListFavoriteSongs) -> Result<Page<SongView>, ApplicationError> {
        let page = Pagination::new(query.page_num, query.page_size)?;
        let user_id = query.user_id;
        let filter = SongFilter {
            song_name: query.song_name.clone(),
            artist_name: query.artist_name.clone(),
            album: query.album.clone(),
        };

        let mut result: Page<SongView> = self
            .cache
            .read_through_query(
                &CacheDomain::Favorite.operation("getFavoriteSongs"),
                &query,
                move || async move {
                    let ids = self.favorite_repo.find_ids(user_id, FavoriteKind::Song).await?;
                    if ids.is_empty() {
                        return Ok(Page::empty());
                    }
                    Ok::<_, ApplicationError>(
                        self.song_repo.find_page_by_ids(&ids, &filter, page).await?,
                    )
                },
            )
            .await?;

        mark_all_liked(&mut result.items);
        Ok(result)
    }
}

/// ListFavoritePlaylists Handler
pub struct ListFavoritePlaylistsHandler {
    playlist_repo: Arc<dyn PlaylistRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl ListFavoritePlaylistsHandler {
    pub fn new(playlist_repo: Arc<dyn PlaylistRepositoryPort>, cache: Arc<QueryCache>) -> Self {
        Self {
            playlist_repo,
            cache,
        }
    }

    pub async fn handle(
        &self,
        query: ListFavoritePlaylists,
    ) -> Result<Page<PlaylistView>, ApplicationError> {
        let page = Pagination::new(query.page_num, query.page_size)?;
        let user_id = query.user_id;
        let filter = PlaylistFilter {
            title: query.title.clone(),
            style: query.style.clone(),
        };

        let mut result: Page<PlaylistView> = self
            .cache
            .read_through_query(
                &CacheDomain::Favorite.operation("getFavoritePlaylists"),
                &query,
                move || async move {
                    Ok::<_, ApplicationError>(
                        self.playlist_repo
                            .find_favorite_page(user_id, &filter, page)
                            .await?,
                    )
                },
            )
            .await?;

        mark_all_liked(&mut result.items);
        Ok(result)
    }
}
