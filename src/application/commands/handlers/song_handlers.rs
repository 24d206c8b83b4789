//! Song Command Handlers

use std::sync::Arc;

use super::blobs::discard_blob;
use crate::application::cache::{QueryCache, SONG_WRITE_DOMAINS};
use crate::application::commands::{AddSong, DeleteSongs, UpdateSong, UpdateSongAudio, UpdateSongCover};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    ArtistRepositoryPort, BlobFolder, BlobStoragePort, NewSong, SongRecord, SongRepositoryPort,
    StyleRepositoryPort,
};
use crate::domain::catalog::{parse_styles, require_name};

const MAX_SONG_NAME_CHARS: usize = 100;
const MAX_ALBUM_CHARS: usize = 100;

/// 按风格标签重写歌曲的风格关联
async fn sync_genres(
    style_repo: &dyn StyleRepositoryPort,
    song_id: u64,
    style: &str,
) -> Result<(), ApplicationError> {
    let names = parse_styles(style);
    let style_ids = style_repo.find_ids_by_names(&names).await?;
    style_repo.replace_song_genres(song_id, &style_ids).await?;

    tracing::debug!(song_id = song_id, styles = ?names, matched = style_ids.len(), "Song genres synced");
    Ok(())
}

async fn require_artist(
    artist_repo: &dyn ArtistRepositoryPort,
    artist_id: u64,
) -> Result<(), ApplicationError> {
    artist_repo
        .find_by_id(artist_id)
        .await?
        .map(|_| ())
        .ok_or_else(|| ApplicationError::not_found("Artist"))
}

// ============================================================================
// AddSong
// ============================================================================

/// AddSong Handler
pub struct AddSongHandler {
    song_repo: Arc<dyn SongRepositoryPort>,
    artist_repo: Arc<dyn ArtistRepositoryPort>,
    style_repo: Arc<dyn StyleRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl AddSongHandler {
    pub fn new(
        song_repo: Arc<dyn SongRepositoryPort>,
        artist_repo: Arc<dyn ArtistRepositoryPort>,
        style_repo: Arc<dyn StyleRepositoryPort>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            song_repo,
            artist_repo,
            style_repo,
            cache,
        }
    }

    pub async fn handle(&self, command: AddSong) -> Result<u64, ApplicationError> {
        let name = require_name("歌曲名", &command.song_name, MAX_SONG_NAME_CHARS)?;
        let album = require_name("专辑", &command.album, MAX_ALBUM_CHARS)?;
        require_artist(self.artist_repo.as_ref(), command.artist_id).await?;

        let style = command.style.trim().to_string();
        let song_id = self
            .song_repo
            .create(&NewSong {
                artist_id: command.artist_id,
                name: name.clone(),
                album,
                lyric: String::new(),
                duration: String::new(),
                style: style.clone(),
                release_time: command.release_time,
            })
            .await?;

        sync_genres(self.style_repo.as_ref(), song_id, &style).await?;
        self.cache.invalidate_all(SONG_WRITE_DOMAINS).await;

        tracing::info!(song_id = song_id, name = %name, "Song added");
        Ok(song_id)
    }
}

// ============================================================================
// UpdateSong
// ============================================================================

/// UpdateSong Handler
pub struct UpdateSongHandler {
    song_repo: Arc<dyn SongRepositoryPort>,
    artist_repo: Arc<dyn ArtistRepositoryPort>,
    style_repo: Arc<dyn StyleRepositoryPort>,
    cache: Arc<QueryCache>,
}

impl UpdateSongHandler {
    pub fn new(
        song_repo: Arc<dyn SongRepositoryPort>,
        artist_repo: Arc<dyn ArtistRepositoryPort>,
        style_repo: Arc<dyn StyleRepositoryPort>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            song_repo,
            artist_repo,
            style_repo,
            cache,
        }
    }

    pub async fn handle(&self, command: UpdateSong) -> Result<(), ApplicationError> {
        let existing = self
            .song_repo
            .find_by_id(command.song_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Song"))?;

        let name = require_name("歌曲名", &command.song_name, MAX_SONG_NAME_CHARS)?;
        let album = require_name("专辑", &command.album, MAX_ALBUM_CHARS)?;
        if command.artist_id != existing.artist_id {
            require_artist(self.artist_repo.as_ref(), command.artist_id).await?;
        }

        let style = command.style.trim().to_string();
        let song = SongRecord {
            artist_id: command.artist_id,
            name,
            album,
            lyric: command.lyric.unwrap_or(existing.lyric.clone()),
            style: style.clone(),
            release_time: command.release_time,
            ..existing
        };
        self.song_repo.update(&song).await?;

        sync_genres(self.style_repo.as_ref(), song.id, &style).await?;
        self.cache.invalidate_all(SONG_WRITE_DOMAINS).await;

        tracing::info!(song_id = song.id, "Song updated");
        Ok(())
    }
}

// ============================================================================
// UpdateSongCover / UpdateSongAudio
// ============================================================================

/// UpdateSongCover Handler
pub struct UpdateSongCoverHandler {
    song_repo: Arc<dyn SongRepositoryPort>,
    storage: Arc<dyn BlobStoragePort>,
    cache: Arc<QueryCache>,
}

impl UpdateSongCoverHandler {
    pub fn new(
        song_repo: Arc<dyn SongRepositoryPort>,
        storage: Arc<dyn BlobStoragePort>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            song_repo,
            storage,
            cache,
        }
    }

    pub async fn handle(&self, command: UpdateSongCover) -> Result<String, ApplicationError> {
        let song = self
            .song_repo
            .find_by_id(command.song_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Song"))?;

        let url = self
            .storage
            .upload(BlobFolder::SongCovers, &command.file_name, &command.data)
            .await?;
        self.song_repo.update_cover(song.id, &url).await?;
        discard_blob(self.storage.as_ref(), &song.cover_url).await;
        self.cache.invalidate_all(SONG_WRITE_DOMAINS).await;

        tracing::info!(song_id = song.id, url = %url, "Song cover updated");
        Ok(url)
    }
}

/// UpdateSongAudio Handler
pub struct UpdateSongAudioHandler {
    song_repo: Arc<dyn SongRepositoryPort>,
    storage: Arc<dyn BlobStoragePort>,
    cache: Arc<QueryCache>,
}

impl UpdateSongAudioHandler {
    pub fn new(
        song_repo: Arc<dyn SongRepositoryPort>,
        storage: Arc<dyn BlobStoragePort>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            song_repo,
            storage,
            cache,
        }
    }

    pub async fn handle(&self, command: UpdateSongAudio) -> Result<String, ApplicationError> {
        let song = self
            .song_repo
            .find_by_id(command.song_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Song"))?;

        let url = self
            .storage
            .upload(BlobFolder::Songs, &command.file_name, &command.data)
            .await?;
        self.song_repo
            .update_audio(song.id, &url, command.duration.trim())
            .await?;
        discard_blob(self.storage.as_ref(), &song.audio_url).await;
        self.cache.invalidate_all(SONG_WRITE_DOMAINS).await;

        tracing::info!(song_id = song.id, url = %url, duration = %command.duration, "Song audio updated");
        Ok(url)
    }
}

// ============================================================================
// DeleteSongs
// ============================================================================

/// DeleteSongs Handler
///
/// 先删封面与音频文件（失败只记日志），再删记录
pub struct DeleteSongsHandler {
    song_repo: Arc<dyn SongRepositoryPort>,
    style_repo: Arc<dyn StyleRepositoryPort>,
    storage: Arc<dyn BlobStoragePort>,
    cache: Arc<QueryCache>,
}

impl DeleteSongsHandler {
    pub fn new(
        song_repo: Arc<dyn SongRepositoryPort>,
        style_repo: Arc<dyn StyleRepositoryPort>,
        storage: Arc<dyn BlobStoragePort>,
        cache: Arc<QueryCache>,
    ) -> Self {
        Self {
            song_repo,
            style_repo,
            storage,
            cache,
        }
    }

    pub async fn handle(&self, command: DeleteSongs) -> Result<u64, ApplicationError> {
        if command.song_ids.is_empty() {
            return Err(ApplicationError::validation("歌曲 ID 列表不能为空"));
        }

        let mut songs = Vec::with_capacity(command.song_ids.len());
        for id in &command.song_ids {
            if let Some(song) = self.song_repo.find_by_id(*id).await? {
                songs.push(song);
            }
        }
        if songs.is_empty() {
            return Err(ApplicationError::not_found("Song"));
        }

        for song in &songs {
            discard_blob(self.storage.as_ref(), &song.cover_url).await;
            discard_blob(self.storage.as_ref(), &song.audio_url).await;
        }

        let ids: Vec<u64> = songs.iter().map(|s| s.id).collect();
        self.style_repo.delete_genres_by_song_ids(&ids).await?;
        let deleted = self.song_repo.delete_by_ids(&ids).await?;
        self.cache.invalidate_all(SONG_WRITE_DOMAINS).await;

        tracing::info!(deleted = deleted, ids = ?ids, "Songs deleted");
        Ok(deleted)
    }
}
