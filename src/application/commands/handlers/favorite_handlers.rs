//! Favorite Command Handlers
//!
//! 收藏变动同时失效 favorite 域与目标所在域（列表里带收藏标记）

use std::sync::Arc;

use crate::application::cache::{
    CacheDomain, QueryCache, PLAYLIST_FAVORITE_DOMAINS, SONG_FAVORITE_DOMAINS,
};
use crate::application::commands::{CancelCollect, Collect};
use crate::application::error::ApplicationError;
use crate::application::ports::{FavoriteRepositoryPort, PlaylistRepositoryPort, SongRepositoryPort};
use crate::domain::catalog::FavoriteTarget;

fn affected_domains(target: FavoriteTarget) -> &'static [CacheDomain] {
    match target {
        FavoriteTarget::Song(_) => SONG_FAVORITE_DOMAINS,
        FavoriteTarget::Playlist(_) => PLAYLIST_FAVORITE_DOMAINS,
    }
}

/// Collect Handler
pub struct CollectHandler {
    favorite_repo: Arc<dyn FavoriteRepositoryPort>,
    song_repo: Arc<dyn SongRepositoryPort>,
    playlist_repo: Arc<dyn PlaylistRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl CollectHandler {
    pub fn new(
        favorite_repo: Arc<dyn FavoriteRepositoryPort>,
        song_repo: Arc<dyn SongRepositoryPort>,
        playlist_repo: Arc<dyn PlaylistRepositoryPort>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            favorite_repo,
            song_repo,
            playlist_repo,
            cache,
        }
    }

    pub async fn handle(&self, command: Collect) -> Result<(), ApplicationError> {
        let target = command.target;
        let exists = match target {
            FavoriteTarget::Song(id) => self.song_repo.find_by_id(id).await?.is_some(),
            FavoriteTarget::Playlist(id) => self.playlist_repo.find_by_id(id).await?.is_some(),
        };
        if !exists {
            return Err(ApplicationError::not_found(match target {
                FavoriteTarget::Song(_) => "Song",
                FavoriteTarget::Playlist(_) => "Playlist",
            }));
        }

        if self.favorite_repo.exists(command.user_id, target).await? {
            return Err(ApplicationError::conflict("已收藏"));
        }

        self.favorite_repo.add(command.user_id, target).await?;
        self.cache.invalidate_all(affected_domains(target)).await;

        tracing::info!(user_id = command.user_id, target = ?target, "Favorite added");
        Ok(())
    }
}

/// CancelCollect Handler
pub struct CancelCollectHandler {
    favorite_repo: Arc<dyn FavoriteRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl CancelCollectHandler {
    pub fn new(favorite_repo: Arc<dyn FavoriteRepositoryPort>, cache: Arc<QueryCache>) -> Self {
        Self {
            favorite_repo,
            cache,
        }
    }

    pub async fn handle(&self, command: CancelCollect) -> Result<(), ApplicationError> {
        let target = command.target;
        if !self.favorite_repo.remove(command.user_id, target).await? {
            return Err(ApplicationError::not_found("Favorite"));
        }
        self.cache.invalidate_all(affected_domains(target)).await;

        tracing::info!(user_id = command.user_id, target = ?target, "Favorite removed");
        Ok(())
    }
}
