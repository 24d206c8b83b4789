//! Blob Storage Port - 媒体文件对象存储
//!
//! 上传返回公开 URL，URL 中编码了对象 key，删除时据此解析

use async_trait::async_trait;
use thiserror::Error;

/// Blob Storage 错误
#[derive(Debug, Error)]
pub enum BlobStorageError {
    #[error("URL does not belong to this storage: {0}")]
    ForeignUrl(String),

    #[error("Invalid object key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// 对象所在目录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobFolder {
    SongCovers,
    Songs,
    ArtistAvatars,
    PlaylistCovers,
    Banners,
    UserAvatars,
}

impl BlobFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlobFolder::SongCovers => "songCovers",
            BlobFolder::Songs => "songs",
            BlobFolder::ArtistAvatars => "artists",
            BlobFolder::PlaylistCovers => "playlists",
            BlobFolder::Banners => "banners",
            BlobFolder::UserAvatars => "users",
        }
    }
}

/// Blob Storage Port
#[async_trait]
pub trait BlobStoragePort: Send + Sync {
    /// 上传文件，返回公开访问 URL
    async fn upload(
        &self,
        folder: BlobFolder,
        file_name: &str,
        data: &[u8],
    ) -> Result<String, BlobStorageError>;

    /// 按 URL 删除，空 URL 为空操作，对象不存在时也返回 Ok
    async fn delete(&self, url: &str) -> Result<(), BlobStorageError>;
}
