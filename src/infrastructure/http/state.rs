//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    AddArtistHandler, AddBannerHandler, AddCommentHandler, AddPlaylistHandler, AddSongHandler,
    BindPlaylistSongsHandler, CancelCollectHandler, CollectHandler, DeleteAccountHandler,
    DeleteArtistsHandler, DeleteBannersHandler, DeleteCommentHandler, DeletePlaylistsHandler,
    DeleteSongsHandler, LikeCommentHandler, LogoutHandler, UpdateArtistAvatarHandler,
    UpdateArtistHandler, UpdateBannerHandler, UpdateBannerStatusHandler,
    UpdatePlaylistCoverHandler, UpdatePlaylistHandler, UpdateSongAudioHandler,
    UpdateSongCoverHandler, UpdateSongHandler, UpdateUserAvatarHandler, UpdateUserInfoHandler,
    // Query handlers
    CountArtistsHandler, CountPlaylistsHandler, CountSongsHandler, CountUsersHandler,
    GetArtistDetailHandler, GetPlaylistDetailHandler, GetRandomArtistsHandler,
    GetRecommendedPlaylistsHandler, GetRecommendedSongsHandler, GetSongDetailHandler,
    GetUserInfoHandler, ListAllBannersHandler, ListArtistNamesHandler, ListArtistsHandler,
    ListBannersHandler, ListFavoritePlaylistsHandler, ListFavoriteSongsHandler,
    ListPlaylistRecordsHandler, ListPlaylistsHandler, ListSongsByArtistHandler, ListSongsHandler,
    // Ports
    ArtistRepositoryPort, BannerRepositoryPort, BlobStoragePort, CommentRepositoryPort,
    FavoriteRepositoryPort, PlaylistRepositoryPort, SongRepositoryPort, StyleRepositoryPort,
    UserRepositoryPort,
    // Services
    PlaylistSource, QueryCache, RecommendationSettings, Recommender, SessionStore, SongSource,
};
use crate::infrastructure::persistence::sqlite::{
    DbPool, SqliteArtistRepository, SqliteBannerRepository, SqliteCommentRepository,
    SqliteFavoriteRepository, SqlitePlaylistRepository, SqliteSongRepository,
    SqliteStyleRepository, SqliteUserRepository,
};

/// 仓储集合
#[derive(Clone)]
pub struct Repositories {
    pub songs: Arc<dyn SongRepositoryPort>,
    pub styles: Arc<dyn StyleRepositoryPort>,
    pub playlists: Arc<dyn PlaylistRepositoryPort>,
    pub artists: Arc<dyn ArtistRepositoryPort>,
    pub favorites: Arc<dyn FavoriteRepositoryPort>,
    pub users: Arc<dyn UserRepositoryPort>,
    pub banners: Arc<dyn BannerRepositoryPort>,
    pub comments: Arc<dyn CommentRepositoryPort>,
}

impl Repositories {
    /// 全部使用 SQLite 实现
    pub fn sqlite(pool: DbPool) -> Self {
        Self {
            songs: Arc::new(SqliteSongRepository::new(pool.clone())),
            styles: Arc::new(SqliteStyleRepository::new(pool.clone())),
            playlists: Arc::new(SqlitePlaylistRepository::new(pool.clone())),
            artists: Arc::new(SqliteArtistRepository::new(pool.clone())),
            favorites: Arc::new(SqliteFavoriteRepository::new(pool.clone())),
            users: Arc::new(SqliteUserRepository::new(pool.clone())),
            banners: Arc::new(SqliteBannerRepository::new(pool.clone())),
            comments: Arc::new(SqliteCommentRepository::new(pool)),
        }
    }
}

/// 应用状态
pub struct AppState {
    // ========== Services ==========
    pub sessions: Arc<SessionStore>,

    // ========== Song ==========
    pub list_songs_handler: ListSongsHandler,
    pub get_song_detail_handler: GetSongDetailHandler,
    pub recommended_songs_handler: GetRecommendedSongsHandler,
    pub list_songs_by_artist_handler: ListSongsByArtistHandler,
    pub add_song_handler: AddSongHandler,
    pub update_song_handler: UpdateSongHandler,
    pub update_song_cover_handler: UpdateSongCoverHandler,
    pub update_song_audio_handler: UpdateSongAudioHandler,
    pub delete_songs_handler: DeleteSongsHandler,

    // ========== Playlist ==========
    pub list_playlists_handler: ListPlaylistsHandler,
    pub get_playlist_detail_handler: GetPlaylistDetailHandler,
    pub recommended_playlists_handler: GetRecommendedPlaylistsHandler,
    pub list_playlist_records_handler: ListPlaylistRecordsHandler,
    pub add_playlist_handler: AddPlaylistHandler,
    pub update_playlist_handler: UpdatePlaylistHandler,
    pub update_playlist_cover_handler: UpdatePlaylistCoverHandler,
    pub bind_playlist_songs_handler: BindPlaylistSongsHandler,
    pub delete_playlists_handler: DeletePlaylistsHandler,

    // ========== Artist ==========
    pub list_artists_handler: ListArtistsHandler,
    pub get_artist_detail_handler: GetArtistDetailHandler,
    pub random_artists_handler: GetRandomArtistsHandler,
    pub list_artist_names_handler: ListArtistNamesHandler,
    pub add_artist_handler: AddArtistHandler,
    pub update_artist_handler: UpdateArtistHandler,
    pub update_artist_avatar_handler: UpdateArtistAvatarHandler,
    pub delete_artists_handler: DeleteArtistsHandler,

    // ========== Banner ==========
    pub list_banners_handler: ListBannersHandler,
    pub list_all_banners_handler: ListAllBannersHandler,
    pub add_banner_handler: AddBannerHandler,
    pub update_banner_handler: UpdateBannerHandler,
    pub update_banner_status_handler: UpdateBannerStatusHandler,
    pub delete_banners_handler: DeleteBannersHandler,

    // ========== Comment ==========
    pub add_comment_handler: AddCommentHandler,
    pub delete_comment_handler: DeleteCommentHandler,
    pub like_comment_handler: LikeCommentHandler,

    // ========== Counts ==========
    pub count_songs_handler: CountSongsHandler,
    pub count_artists_handler: CountArtistsHandler,
    pub count_playlists_handler: CountPlaylistsHandler,
    pub count_users_handler: CountUsersHandler,

    // ========== Favorite / Account ==========
    pub favorite_songs_handler: ListFavoriteSongsHandler,
    pub favorite_playlists_handler: ListFavoritePlaylistsHandler,
    pub collect_handler: CollectHandler,
    pub cancel_collect_handler: CancelCollectHandler,
    pub logout_handler: LogoutHandler,
    pub delete_account_handler: DeleteAccountHandler,
    pub get_user_info_handler: GetUserInfoHandler,
    pub update_user_info_handler: UpdateUserInfoHandler,
    pub update_user_avatar_handler: UpdateUserAvatarHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        repos: Repositories,
        storage: Arc<dyn BlobStoragePort>,
        cache: Arc<QueryCache>,
        sessions: Arc<SessionStore>,
        recommendation: RecommendationSettings,
    ) -> Self {
        let Repositories {
            songs,
            styles,
            playlists,
            artists,
            favorites,
            users,
            banners,
            comments,
        } = repos;

        let song_recommender = Recommender::new(
            SongSource::new(songs.clone(), favorites.clone(), styles.clone()),
            recommendation,
        );
        let playlist_recommender = Recommender::new(
            PlaylistSource::new(playlists.clone(), favorites.clone(), styles.clone()),
            recommendation,
        );

        Self {
            sessions: sessions.clone(),

            // Song
            list_songs_handler: ListSongsHandler::new(
                songs.clone(),
                favorites.clone(),
                cache.clone(),
            ),
            get_song_detail_handler: GetSongDetailHandler::new(
                songs.clone(),
                comments.clone(),
                favorites.clone(),
                cache.clone(),
            ),
            recommended_songs_handler: GetRecommendedSongsHandler::new(song_recommender),
            list_songs_by_artist_handler: ListSongsByArtistHandler::new(
                songs.clone(),
                cache.clone(),
            ),
            add_song_handler: AddSongHandler::new(
                songs.clone(),
                artists.clone(),
                styles.clone(),
                cache.clone(),
            ),
            update_song_handler: UpdateSongHandler::new(
                songs.clone(),
                artists.clone(),
                styles.clone(),
                cache.clone(),
            ),
            update_song_cover_handler: UpdateSongCoverHandler::new(
                songs.clone(),
                storage.clone(),
                cache.clone(),
            ),
            update_song_audio_handler: UpdateSongAudioHandler::new(
                songs.clone(),
                storage.clone(),
                cache.clone(),
            ),
            delete_songs_handler: DeleteSongsHandler::new(
                songs.clone(),
                styles.clone(),
                storage.clone(),
                cache.clone(),
            ),

            // Playlist
            list_playlists_handler: ListPlaylistsHandler::new(
                playlists.clone(),
                favorites.clone(),
                cache.clone(),
            ),
            get_playlist_detail_handler: GetPlaylistDetailHandler::new(
                playlists.clone(),
                comments.clone(),
                favorites.clone(),
                cache.clone(),
            ),
            recommended_playlists_handler: GetRecommendedPlaylistsHandler::new(
                playlist_recommender,
            ),
            list_playlist_records_handler: ListPlaylistRecordsHandler::new(
                playlists.clone(),
                cache.clone(),
            ),
            add_playlist_handler: AddPlaylistHandler::new(playlists.clone(), cache.clone()),
            update_playlist_handler: UpdatePlaylistHandler::new(playlists.clone(), cache.clone()),
            update_playlist_cover_handler: UpdatePlaylistCoverHandler::new(
                playlists.clone(),
                storage.clone(),
                cache.clone(),
            ),
            bind_playlist_songs_handler: BindPlaylistSongsHandler::new(
                playlists.clone(),
                songs.clone(),
                cache.clone(),
            ),
            delete_playlists_handler: DeletePlaylistsHandler::new(
                playlists.clone(),
                storage.clone(),
                cache.clone(),
            ),

            // Artist
            list_artists_handler: ListArtistsHandler::new(artists.clone(), cache.clone()),
            get_artist_detail_handler: GetArtistDetailHandler::new(
                artists.clone(),
                favorites.clone(),
                cache.clone(),
            ),
            random_artists_handler: GetRandomArtistsHandler::new(artists.clone()),
            list_artist_names_handler: ListArtistNamesHandler::new(artists.clone(), cache.clone()),
            add_artist_handler: AddArtistHandler::new(artists.clone(), cache.clone()),
            update_artist_handler: UpdateArtistHandler::new(artists.clone(), cache.clone()),
            update_artist_avatar_handler: UpdateArtistAvatarHandler::new(
                artists.clone(),
                storage.clone(),
                cache.clone(),
            ),
            delete_artists_handler: DeleteArtistsHandler::new(
                artists.clone(),
                storage.clone(),
                cache.clone(),
            ),

            // Banner
            list_banners_handler: ListBannersHandler::new(banners.clone(), cache.clone()),
            add_banner_handler: AddBannerHandler::new(
                banners.clone(),
                storage.clone(),
                cache.clone(),
            ),
            list_all_banners_handler: ListAllBannersHandler::new(banners.clone(), cache.clone()),
            update_banner_handler: UpdateBannerHandler::new(
                banners.clone(),
                storage.clone(),
                cache.clone(),
            ),
            update_banner_status_handler: UpdateBannerStatusHandler::new(
                banners.clone(),
                cache.clone(),
            ),
            delete_banners_handler: DeleteBannersHandler::new(
                banners,
                storage.clone(),
                cache.clone(),
            ),

            // Comment
            add_comment_handler: AddCommentHandler::new(
                comments.clone(),
                songs.clone(),
                playlists.clone(),
                cache.clone(),
            ),
            delete_comment_handler: DeleteCommentHandler::new(comments.clone(), cache.clone()),
            like_comment_handler: LikeCommentHandler::new(comments.clone(), cache.clone()),

            // Counts
            count_songs_handler: CountSongsHandler::new(songs.clone()),
            count_artists_handler: CountArtistsHandler::new(artists),
            count_playlists_handler: CountPlaylistsHandler::new(playlists.clone()),
            count_users_handler: CountUsersHandler::new(users.clone()),

            // Favorite / Account
            favorite_songs_handler: ListFavoriteSongsHandler::new(
                songs.clone(),
                favorites.clone(),
                cache.clone(),
            ),
            favorite_playlists_handler: ListFavoritePlaylistsHandler::new(
                playlists.clone(),
                cache.clone(),
            ),
            collect_handler: CollectHandler::new(
                favorites.clone(),
                songs,
                playlists,
                cache.clone(),
            ),
            cancel_collect_handler: CancelCollectHandler::new(favorites.clone(), cache.clone()),
            logout_handler: LogoutHandler::new(sessions.clone(), cache.clone()),
            get_user_info_handler: GetUserInfoHandler::new(users.clone(), cache.clone()),
            update_user_info_handler: UpdateUserInfoHandler::new(users.clone(), cache.clone()),
            update_user_avatar_handler: UpdateUserAvatarHandler::new(
                users.clone(),
                storage.clone(),
                cache.clone(),
            ),
            delete_account_handler: DeleteAccountHandler::new(
                users,
                favorites,
                comments,
                storage,
                sessions,
                cache,
            ),
        }
    }
}
