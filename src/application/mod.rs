//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（Repository、CacheStore、BlobStorage）
//! - cache: Read-Through 查询缓存与按域失效
//! - recommendation: 基于收藏风格的推荐
//! - session: 令牌会话
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod cache;
pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod recommendation;
pub mod session;

// Re-exports
pub use cache::{CacheDomain, CacheKey, CacheSettings, QueryCache};
pub use error::ApplicationError;
pub use recommendation::{
    PlaylistSource, RecommendationSettings, RecommendationSource, Recommender, SongSource,
};
pub use session::{SessionStore, DEFAULT_SESSION_TTL};

pub use commands::{
    AddArtist, AddBanner, AddComment, AddPlaylist, AddSong, BindPlaylistSongs, CancelCollect,
    Collect, DeleteAccount, DeleteArtists, DeleteBanners, DeleteComment, DeletePlaylists,
    DeleteSongs, LikeComment, Logout, UpdateArtist, UpdateArtistAvatar, UpdateBanner,
    UpdateBannerStatus, UpdatePlaylist, UpdatePlaylistCover, UpdateSong, UpdateSongAudio,
    UpdateSongCover, UpdateUserAvatar, UpdateUserInfo,
    // Handlers
    handlers::{
        AddArtistHandler, AddBannerHandler, AddCommentHandler, AddPlaylistHandler, AddSongHandler,
        BindPlaylistSongsHandler, CancelCollectHandler, CollectHandler, DeleteAccountHandler,
        DeleteArtistsHandler, DeleteBannersHandler, DeleteCommentHandler, DeletePlaylistsHandler,
        DeleteSongsHandler, LikeCommentHandler, LogoutHandler, UpdateArtistAvatarHandler,
        UpdateArtistHandler, UpdateBannerHandler, UpdateBannerStatusHandler,
        UpdatePlaylistCoverHandler, UpdatePlaylistHandler, UpdateSongAudioHandler,
        UpdateSongCoverHandler, UpdateSongHandler, UpdateUserAvatarHandler, UpdateUserInfoHandler,
    },
};

pub use queries::{
    CountArtists, CountPlaylists, CountSongs, CountUsers, GetArtistDetail, GetPlaylistDetail,
    GetRandomArtists, GetRecommendedPlaylists, GetRecommendedSongs, GetSongDetail, GetUserInfo,
    ListAllBanners, ListArtistNames, ListArtists, ListBanners, ListFavoritePlaylists,
    ListFavoriteSongs, ListPlaylistRecords, ListPlaylists, ListSongs, ListSongsByArtist,
    // Handlers
    handlers::{
        CountArtistsHandler, CountPlaylistsHandler, CountSongsHandler, CountUsersHandler,
        GetArtistDetailHandler, GetPlaylistDetailHandler, GetRandomArtistsHandler,
        GetRecommendedPlaylistsHandler, GetRecommendedSongsHandler, GetSongDetailHandler,
        GetUserInfoHandler, ListAllBannersHandler, ListArtistNamesHandler, ListArtistsHandler,
        ListBannersHandler, ListFavoritePlaylistsHandler, ListFavoriteSongsHandler,
        ListPlaylistRecordsHandler, ListPlaylistsHandler, ListSongsByArtistHandler,
        ListSongsHandler,
    },
};

pub use ports::{
    ArtistRepositoryPort, BannerRepositoryPort, BlobStoragePort, CacheError, CacheStorePort,
    CommentRepositoryPort, FavoriteRepositoryPort, PlaylistRepositoryPort, RepositoryError,
    SongRepositoryPort, StyleRepositoryPort, UserRepositoryPort,
};
