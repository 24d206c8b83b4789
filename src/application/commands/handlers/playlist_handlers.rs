//! Playlist Command Handlers

use std::sync::Arc;

use super::blobs::discard_blob;
use crate::application::cache::{CacheDomain, QueryCache, PLAYLIST_WRITE_DOMAINS};
use crate::application::commands::{
    AddPlaylist, BindPlaylistSongs, DeletePlaylists, UpdatePlaylist, UpdatePlaylistCover,
};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    BlobFolder, BlobStoragePort, NewPlaylist, PlaylistRecord, PlaylistRepositoryPort,
    SongRepositoryPort,
};
use crate::domain::catalog::require_name;

const MAX_TITLE_CHARS: usize = 50;

/// AddPlaylist Handler
pub struct AddPlaylistHandler {
    playlist_repo: Arc<dyn PlaylistRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl AddPlaylistHandler {
    pub fn new(playlist_repo: Arc<dyn PlaylistRepositoryPort>, cache: Arc<QueryCache>) -> Self {
        Self {
            playlist_repo,
            cache,
        }
    }

    pub async fn handle(&self, command: AddPlaylist) -> Result<u64, ApplicationError> {
        let title = require_name("歌单标题", &command.title, MAX_TITLE_CHARS)?;
        if self.playlist_repo.find_by_title(&title).await?.is_some() {
            return Err(ApplicationError::conflict("歌单已存在"));
        }

        let playlist_id = self
            .playlist_repo
            .create(&NewPlaylist {
                title: title.clone(),
                introduction: command.introduction,
                style: command.style.trim().to_string(),
            })
            .await?;
        self.cache.invalidate(CacheDomain::Playlist).await;

        tracing::info!(playlist_id = playlist_id, title = %title, "Playlist added");
        Ok(playlist_id)
    }
}

/// UpdatePlaylist Handler
pub struct UpdatePlaylistHandler {
    playlist_repo: Arc<dyn PlaylistRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl UpdatePlaylistHandler {
    pub fn new(playlist_repo: Arc<dyn PlaylistRepositoryPort>, cache: Arc<QueryCache>) -> Self {
        Self {
            playlist_repo,
            cache,
        }
    }

    pub async fn handle(&self, command: UpdatePlaylist) -> Result<(), ApplicationError> {
        let existing = self
            .playlist_repo
            .find_by_id(command.playlist_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Playlist"))?;

        let title = require_name("歌单标题", &command.title, MAX_TITLE_CHARS)?;
        if let Some(other) = self.playlist_repo.find_by_title(&title).await? {
            if other.playlist_id != existing.playlist_id {
                return Err(ApplicationError::conflict("歌单已存在"));
            }
        }

        let playlist = PlaylistRecord {
            title,
            introduction: command.introduction,
            style: command.style.trim().to_string(),
            ..existing
        };
        self.playlist_repo.update(&playlist).await?;
        self.cache.invalidate_all(PLAYLIST_WRITE_DOMAINS).await;

        tracing::info!(playlist_id = playlist.playlist_id, "Playlist updated");
        Ok(())
    }
}

/// UpdatePlaylistCover Handler
pub struct UpdatePlaylistCoverHandler {
    playlist_repo: Arc<dyn PlaylistRepositoryPort>,
    storage: Arc<dyn BlobStoragePort>,
    cache: Arc<QueryCache>,
}

impl UpdatePlaylistCoverHandler {
    pub fn new(
        playlist_repo: Arc<dyn PlaylistRepositoryPort>,
        storage: Arc<dyn BlobStoragePort>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            playlist_repo,
            storage,
            cache,
        }
    }

    pub async fn handle(&self, command: UpdatePlaylistCover) -> Result<String, ApplicationError> {
        let playlist = self
            .playlist_repo
            .find_by_id(command.playlist_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Playlist"))?;

        let url = self
            .storage
            .upload(BlobFolder::PlaylistCovers, &command.file_name, &command.data)
            .await?;
        self.playlist_repo
            .update_cover(playlist.playlist_id, &url)
            .await?;
        discard_blob(self.storage.as_ref(), &playlist.cover_url).await;
        self.cache.invalidate_all(PLAYLIST_WRITE_DOMAINS).await;

        tracing::info!(playlist_id = playlist.playlist_id, url = %url, "Playlist cover updated");
        Ok(url)
    }
}

/// BindPlaylistSongs Handler
pub struct BindPlaylistSongsHandler {
    playlist_repo: Arc<dyn PlaylistRepositoryPort>,
    song_repo: Arc<dyn SongRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl BindPlaylistSongsHandler {
    pub fn new(
        playlist_repo: Arc<dyn PlaylistRepositoryPort>,
        song_repo: Arc<dyn SongRepositoryPort>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            playlist_repo,
            song_repo,
            cache,
        }
    }

    pub async fn handle(&self, command: BindPlaylistSongs) -> Result<(), ApplicationError> {
        if command.song_ids.is_empty() {
            return Err(ApplicationError::validation("歌曲 ID 列表不能为空"));
        }

        self.playlist_repo
            .find_by_id(command.playlist_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Playlist"))?;

        for song_id in &command.song_ids {
            if self.song_repo.find_by_id(*song_id).await?.is_none() {
                return Err(ApplicationError::not_found("Song"));
            }
        }

        self.playlist_repo
            .add_songs(command.playlist_id, &command.song_ids)
            .await?;
        self.cache.invalidate(CacheDomain::Playlist).await;

        tracing::info!(
            playlist_id = command.playlist_id,
            songs = command.song_ids.len(),
            "Songs bound to playlist"
        );
        Ok(())
    }
}

/// DeletePlaylists Handler
pub struct DeletePlaylistsHandler {
    playlist_repo: Arc<dyn PlaylistRepositoryPort>,
    storage: Arc<dyn BlobStoragePort>,
    cache: Arc<QueryCache>,
}

impl DeletePlaylistsHandler {
    pub fn new(
        playlist_repo: Arc<dyn PlaylistRepositoryPort>,
        storage: Arc<dyn BlobStoragePort>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            playlist_repo,
            storage,
            cache,
        }
    }

    pub async fn handle(&self, command: DeletePlaylists) -> Result<u64, ApplicationError> {
        if command.playlist_ids.is_empty() {
            return Err(ApplicationError::validation("歌单 ID 列表不能为空"));
        }

        let mut playlists = Vec::with_capacity(command.playlist_ids.len());
        for id in &command.playlist_ids {
            if let Some(playlist) = self.playlist_repo.find_by_id(*id).await? {
                playlists.push(playlist);
            }
        }
        if playlists.is_empty() {
            return Err(ApplicationError::not_found("Playlist"));
        }

        for playlist in &playlists {
            discard_blob(self.storage.as_ref(), &playlist.cover_url).await;
        }

        let ids: Vec<u64> = playlists.iter().map(|p| p.playlist_id).collect();
        let deleted = self.playlist_repo.delete_by_ids(&ids).await?;
        self.cache.invalidate_all(PLAYLIST_WRITE_DOMAINS).await;

        tracing::info!(deleted = deleted, ids = ?ids, "Playlists deleted");
        Ok(deleted)
    }
}
