//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod blob_storage;
mod cache_store;
mod read_models;
mod repositories;

pub use blob_storage::{BlobFolder, BlobStorageError, BlobStoragePort};
pub use cache_store::{glob_literal_prefix, CacheError, CacheStorePort};
pub use read_models::{
    ArtistDetailView, ArtistNameView, ArtistRecord, ArtistView, BannerAdminView, BannerView,
    CommentView, PlaylistDetailView, PlaylistRecord, PlaylistView, SongAdminView, SongDetailView,
    SongView, UserInfoView,
};
pub use repositories::{
    ArtistFilter, ArtistRepositoryPort, ArtistSongFilter, BannerRecord, BannerRepositoryPort,
    CommentRecord, CommentRepositoryPort, FavoriteRepositoryPort, NewArtist, NewPlaylist, NewSong, PlaylistFilter,
    PlaylistRepositoryPort, RepositoryError, SongFilter, SongRecord, SongRepositoryPort,
    StyleRepositoryPort, UserRecord, UserRepositoryPort,
};
