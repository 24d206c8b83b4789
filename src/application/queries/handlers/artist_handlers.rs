//! Artist Query Handlers

use std::sync::Arc;

use super::likes::viewer_favorites;
use crate::application::cache::{CacheDomain, CacheKey, QueryCache};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ArtistDetailView, ArtistFilter, ArtistNameView, ArtistRepositoryPort, ArtistView,
    FavoriteRepositoryPort,
};
use crate::application::queries::{GetArtistDetail, GetRandomArtists, ListArtistNames, ListArtists};
use crate::domain::catalog::{FavoriteKind, Page, Pagination};
use crate::domain::recommendation::{annotate_like_status, DEFAULT_QUOTA};
use crate::domain::Identity;

/// ListArtists Handler
pub struct ListArtistsHandler {
    artist_repo: Arc<dyn ArtistRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl ListArtistsHandler {
    pub fn new(artist_repo: Arc<dyn ArtistRepositoryPort>, cache: Arc<QueryCache>) -> Self {
        Self { artist_repo, cache }
    }

    pub async fn handle(&self, query: ListArtists) -> Result<Page<ArtistView>, ApplicationError> {
        let page = Pagination::new(query.page_num, query.page_size)?;
        let filter = ArtistFilter {
            artist_name: query.artist_name.clone(),
            gender: query.gender,
            area: query.area.clone(),
        };

        self.cache
            .read_through_query(
                &CacheDomain::Artist.operation("getAllArtists"),
                &query,
                move || async move {
                    let result = self.artist_repo.find_page(&filter, page).await?;
                    if result.is_empty() {
                        return Err(ApplicationError::not_found("Artist"));
                    }
                    Ok(result)
                },
            )
            .await
    }
}

/// GetArtistDetail Handler
pub struct GetArtistDetailHandler {
    artist_repo: Arc<dyn ArtistRepositoryPort>,
    favorite_repo: Arc<dyn FavoriteRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl GetArtistDetailHandler {
    pub fn new(
        artist_repo: Arc<dyn ArtistRepositoryPort>,
        favorite_repo: Arc<dyn FavoriteRepositoryPort>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            artist_repo,
            favorite_repo,
            cache,
        }
    }

    pub async fn handle(
        &self,
        query: GetArtistDetail,
        viewer: Option<&Identity>,
    ) -> Result<ArtistDetailView, ApplicationError> {
        let artist_id = query.artist_id;
        let key = CacheKey::build(
            &CacheDomain::Artist.operation("getArtistDetail"),
            &[&artist_id],
        );

        let mut detail: ArtistDetailView = self
            .cache
            .read_through(&key, move || async move {
                self.artist_repo
                    .find_detail(artist_id)
                    .await?
                    .ok_or_else(|| ApplicationError::not_found("Artist"))
            })
            .await?;

        let favorites =
            viewer_favorites(self.favorite_repo.as_ref(), viewer, FavoriteKind::Song).await?;
        annotate_like_status(&mut detail.songs, &favorites);
        Ok(detail)
    }
}

/// GetRandomArtists Handler（不缓存）
pub struct GetRandomArtistsHandler {
    artist_repo: Arc<dyn ArtistRepositoryPort>,
}

impl GetRandomArtistsHandler {
    pub fn new(artist_repo: Arc<dyn ArtistRepositoryPort>) -> Self {
        Self { artist_repo }
    }

    pub async fn handle(&self, _query: GetRandomArtists) -> Result<Vec<ArtistView>, ApplicationError> {
        let artists = self.artist_repo.find_random(DEFAULT_QUOTA).await?;
        if artists.is_empty() {
            return Err(ApplicationError::not_found("Artist"));
        }
        Ok(artists)
    }
}

/// ListArtistNames Handler（管理端）
pub struct ListArtistNamesHandler {
    artist_repo: Arc<dyn ArtistRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl ListArtistNamesHandler {
    pub fn new(artist_repo: Arc<dyn ArtistRepositoryPort>, cache: Arc<QueryCache>) -> Self {
        Self { artist_repo, cache }
    }

    pub async fn handle(
        &self,
        _query: ListArtistNames,
    ) -> Result<Vec<ArtistNameView>, ApplicationError> {
        let key = CacheKey::build(&CacheDomain::Artist.operation("getAllArtistNames"), &[]);

        self.cache
            .read_through(&key, move || async move {
                let names = self.artist_repo.find_names().await?;
                if names.is_empty() {
                    return Err(ApplicationError::not_found("Artist"));
                }
                Ok(names)
            })
            .await
    }
}
