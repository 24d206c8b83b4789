//! Count Query Handlers
//!
//! 管理端统计直接读库，不走缓存

use std::sync::Arc;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    ArtistRepositoryPort, PlaylistRepositoryPort, SongRepositoryPort, UserRepositoryPort,
};
use crate::application::queries::{CountArtists, CountPlaylists, CountSongs, CountUsers};

/// CountSongs Handler
pub struct CountSongsHandler {
    song_repo: Arc<dyn SongRepositoryPort>,
}

impl CountSongsHandler {
    pub fn new(song_repo: Arc<dyn SongRepositoryPort>) -> Self {
        Self { song_repo }
    }

    pub async fn handle(&self, query: CountSongs) -> Result<u64, ApplicationError> {
        Ok(self.song_repo.count_by_style(query.style.as_deref()).await?)
    }
}

/// CountArtists Handler
pub struct CountArtistsHandler {
    artist_repo: Arc<dyn ArtistRepositoryPort>,
}

impl CountArtistsHandler {
    pub fn new(artist_repo: Arc<dyn ArtistRepositoryPort>) -> Self {
        Self { artist_repo }
    }

    pub async fn handle(&self, query: CountArtists) -> Result<u64, ApplicationError> {
        Ok(self
            .artist_repo
            .count(query.gender, query.area.as_deref())
            .await?)
    }
}

/// CountPlaylists Handler
pub struct CountPlaylistsHandler {
    playlist_repo: Arc<dyn PlaylistRepositoryPort>,
}

impl CountPlaylistsHandler {
    pub fn new(playlist_repo: Arc<dyn PlaylistRepositoryPort>) -> Self {
        Self { playlist_repo }
    }

    pub async fn handle(&self, query: CountPlaylists) -> Result<u64, ApplicationError> {
        Ok(self
            .playlist_repo
            .count_by_style(query.style.as_deref())
            .await?)
    }
}

/// CountUsers Handler
pub struct CountUsersHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl CountUsersHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(&self, _query: CountUsers) -> Result<u64, ApplicationError> {
        Ok(self.user_repo.count().await?)
    }
}
