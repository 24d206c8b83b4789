//! Artist Command Handlers

use std::sync::Arc;

use super::blobs::discard_blob;
use crate::application::cache::{CacheDomain, QueryCache, ARTIST_WRITE_DOMAINS};
use crate::application::commands::{AddArtist, DeleteArtists, UpdateArtist, UpdateArtistAvatar};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ArtistRecord, ArtistRepositoryPort, BlobFolder, BlobStoragePort, NewArtist,
};
use crate::domain::catalog::require_name;

const MAX_ARTIST_NAME_CHARS: usize = 50;

/// AddArtist Handler
pub struct AddArtistHandler {
    artist_repo: Arc<dyn ArtistRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl AddArtistHandler {
    pub fn new(artist_repo: Arc<dyn ArtistRepositoryPort>, cache: Arc<QueryCache>) -> Self {
        Self { artist_repo, cache }
    }

    pub async fn handle(&self, command: AddArtist) -> Result<u64, ApplicationError> {
        let name = require_name("歌手名", &command.artist_name, MAX_ARTIST_NAME_CHARS)?;
        if self.artist_repo.exists_by_name(&name).await? {
            return Err(ApplicationError::conflict("歌手已存在"));
        }

        let artist_id = self
            .artist_repo
            .create(&NewArtist {
                name: name.clone(),
                gender: command.gender,
                birth: command.birth,
                area: command.area.trim().to_string(),
                introduction: command.introduction,
            })
            .await?;
        self.cache.invalidate(CacheDomain::Artist).await;

        tracing::info!(artist_id = artist_id, name = %name, "Artist added");
        Ok(artist_id)
    }
}

/// UpdateArtist Handler
pub struct UpdateArtistHandler {
    artist_repo: Arc<dyn ArtistRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl UpdateArtistHandler {
    pub fn new(artist_repo: Arc<dyn ArtistRepositoryPort>, cache: Arc<QueryCache>) -> Self {
        Self { artist_repo, cache }
    }

    pub async fn handle(&self, command: UpdateArtist) -> Result<(), ApplicationError> {
        let existing = self
            .artist_repo
            .find_by_id(command.artist_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Artist"))?;

        let name = require_name("歌手名", &command.artist_name, MAX_ARTIST_NAME_CHARS)?;
        if name != existing.artist_name && self.artist_repo.exists_by_name(&name).await? {
            return Err(ApplicationError::conflict("歌手已存在"));
        }

        let artist = ArtistRecord {
            artist_name: name,
            gender: command.gender,
            birth: command.birth,
            area: command.area.trim().to_string(),
            introduction: command.introduction,
            ..existing
        };
        self.artist_repo.update(&artist).await?;
        self.cache.invalidate_all(ARTIST_WRITE_DOMAINS).await;

        tracing::info!(artist_id = artist.artist_id, "Artist updated");
        Ok(())
    }
}

/// UpdateArtistAvatar Handler
pub struct UpdateArtistAvatarHandler {
    artist_repo: Arc<dyn ArtistRepositoryPort>,
    storage: Arc<dyn BlobStoragePort>,
    cache: Arc<QueryCache>,
}

impl UpdateArtistAvatarHandler {
    pub fn new(
        artist_repo: Arc<dyn ArtistRepositoryPort>,
        storage: Arc<dyn BlobStoragePort>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            artist_repo,
            storage,
            cache,
        }
    }

    pub async fn handle(&self, command: UpdateArtistAvatar) -> Result<String, ApplicationError> {
        let artist = self
            .artist_repo
            .find_by_id(command.artist_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Artist"))?;

        let url = self
            .storage
            .upload(BlobFolder::ArtistAvatars, &command.file_name, &command.data)
            .await?;
        self.artist_repo.update_avatar(artist.artist_id, &url).await?;
        discard_blob(self.storage.as_ref(), &artist.avatar).await;
        self.cache.invalidate_all(ARTIST_WRITE_DOMAINS).await;

        tracing::info!(artist_id = artist.artist_id, url = %url, "Artist avatar updated");
        Ok(url)
    }
}

/// DeleteArtists Handler
pub struct DeleteArtistsHandler {
    artist_repo: Arc<dyn ArtistRepositoryPort>,
    storage: Arc<dyn BlobStoragePort>,
    cache: Arc<QueryCache>,
}

impl DeleteArtistsHandler {
    pub fn new(
        artist_repo: Arc<dyn ArtistRepositoryPort>,
        storage: Arc<dyn BlobStoragePort>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            artist_repo,
            storage,
            cache,
        }
    }

    pub async fn handle(&self, command: DeleteArtists) -> Result<u64, ApplicationError> {
        if command.artist_ids.is_empty() {
            return Err(ApplicationError::validation("歌手 ID 列表不能为空"));
        }

        let mut artists = Vec::with_capacity(command.artist_ids.len());
        for id in &command.artist_ids {
            if let Some(artist) = self.artist_repo.find_by_id(*id).await? {
                artists.push(artist);
            }
        }
        if artists.is_empty() {
            return Err(ApplicationError::not_found("Artist"));
        }

        for artist in &artists {
            discard_blob(self.storage.as_ref(), &artist.avatar).await;
        }

        let ids: Vec<u64> = artists.iter().map(|a| a.artist_id).collect();
        let deleted = self.artist_repo.delete_by_ids(&ids).await?;
        self.cache.invalidate_all(ARTIST_WRITE_DOMAINS).await;

        tracing::info!(deleted = deleted, ids = ?ids, "Artists deleted");
        Ok(deleted)
    }
}
