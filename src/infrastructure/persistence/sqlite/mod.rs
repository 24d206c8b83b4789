//! SQLite Persistence - SQLite 数据库持久化实现

mod database;
mod support;
mod song_repo;
mod style_repo;
mod playlist_repo;
mod artist_repo;
mod favorite_repo;
mod user_repo;
mod banner_repo;
mod comment_repo;

#[cfg(test)]
mod tests;

pub use database::*;
pub use song_repo::SqliteSongRepository;
pub use style_repo::SqliteStyleRepository;
pub use playlist_repo::SqlitePlaylistRepository;
pub use artist_repo::SqliteArtistRepository;
pub use favorite_repo::SqliteFavoriteRepository;
pub use user_repo::SqliteUserRepository;
pub use banner_repo::SqliteBannerRepository;
pub use comment_repo::SqliteCommentRepository;
