//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite）

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use super::read_models::{
    ArtistDetailView, ArtistNameView, ArtistRecord, ArtistView, BannerAdminView, BannerView,
    CommentView, PlaylistDetailView, PlaylistRecord, PlaylistView, SongAdminView, SongDetailView,
    SongView,
};
use crate::domain::catalog::{
    BannerStatus, CommentTarget, FavoriteKind, FavoriteTarget, Gender, Page, Pagination,
};
use crate::domain::profile::UserProfile;

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Song Repository
// ============================================================================

/// 歌曲筛选条件（均可选，LIKE 匹配）
#[derive(Debug, Clone, Default)]
pub struct SongFilter {
    pub song_name: Option<String>,
    pub artist_name: Option<String>,
    pub album: Option<String>,
}

/// 管理端按歌手筛选歌曲
#[derive(Debug, Clone, Default)]
pub struct ArtistSongFilter {
    pub artist_id: Option<u64>,
    pub song_name: Option<String>,
    pub album: Option<String>,
}

/// 歌曲实体（用于持久化）
#[derive(Debug, Clone, PartialEq)]
pub struct SongRecord {
    pub id: u64,
    pub artist_id: u64,
    pub name: String,
    pub album: String,
    pub lyric: String,
    pub duration: String,
    pub style: String,
    pub cover_url: String,
    pub audio_url: String,
    pub release_time: Option<NaiveDate>,
}

/// 新建歌曲
#[derive(Debug, Clone)]
pub struct NewSong {
    pub artist_id: u64,
    pub name: String,
    pub album: String,
    pub lyric: String,
    pub duration: String,
    pub style: String,
    pub release_time: Option<NaiveDate>,
}

/// Song Repository Port
#[async_trait]
pub trait SongRepositoryPort: Send + Sync {
    /// 分页查询歌曲（id 倒序）
    async fn find_page(
        &self,
        filter: &SongFilter,
        page: Pagination,
    ) -> Result<Page<SongView>, RepositoryError>;

    /// 在指定 ID 范围内分页查询
    async fn find_page_by_ids(
        &self,
        ids: &[u64],
        filter: &SongFilter,
        page: Pagination,
    ) -> Result<Page<SongView>, RepositoryError>;

    /// 管理端分页查询（发行时间倒序）
    async fn find_admin_page(
        &self,
        filter: &ArtistSongFilter,
        page: Pagination,
    ) -> Result<Page<SongAdminView>, RepositoryError>;

    /// 歌曲详情
    async fn find_detail(&self, id: u64) -> Result<Option<SongDetailView>, RepositoryError>;

    /// 随机取样，跳过 exclude 中的 ID
    async fn find_random(
        &self,
        limit: usize,
        exclude: &[u64],
    ) -> Result<Vec<SongView>, RepositoryError>;

    /// 指定歌曲的风格标签
    async fn find_styles_by_ids(&self, ids: &[u64]) -> Result<Vec<String>, RepositoryError>;

    /// 风格标签命中 styles 且不在 exclude 中的随机歌曲
    async fn find_by_styles(
        &self,
        styles: &[String],
        exclude: &[u64],
        limit: usize,
    ) -> Result<Vec<SongView>, RepositoryError>;

    async fn find_by_id(&self, id: u64) -> Result<Option<SongRecord>, RepositoryError>;

    /// 新建，返回 ID
    async fn create(&self, song: &NewSong) -> Result<u64, RepositoryError>;

    async fn update(&self, song: &SongRecord) -> Result<(), RepositoryError>;

    async fn update_cover(&self, id: u64, cover_url: &str) -> Result<(), RepositoryError>;

    async fn update_audio(
        &self,
        id: u64,
        audio_url: &str,
        duration: &str,
    ) -> Result<(), RepositoryError>;

    /// 批量删除（连同绑定、收藏与评论），返回删除数量
    async fn delete_by_ids(&self, ids: &[u64]) -> Result<u64, RepositoryError>;

    /// 歌曲总数，style 为 LIKE 匹配
    async fn count_by_style(&self, style: Option<&str>) -> Result<u64, RepositoryError>;
}

// ============================================================================
// Style / Genre Repository
// ============================================================================

/// Style Repository Port
///
/// 风格字典与歌曲-风格关联（genre）
#[async_trait]
pub trait StyleRepositoryPort: Send + Sync {
    /// 名称转 ID，未知名称忽略
    async fn find_ids_by_names(&self, names: &[String]) -> Result<Vec<u64>, RepositoryError>;

    /// 覆盖歌曲的风格关联
    async fn replace_song_genres(
        &self,
        song_id: u64,
        style_ids: &[u64],
    ) -> Result<(), RepositoryError>;

    async fn delete_genres_by_song_ids(&self, song_ids: &[u64]) -> Result<(), RepositoryError>;
}

// ============================================================================
// Playlist Repository
// ============================================================================

/// 歌单筛选条件
#[derive(Debug, Clone, Default)]
pub struct PlaylistFilter {
    pub title: Option<String>,
    pub style: Option<String>,
}

/// 新建歌单
#[derive(Debug, Clone)]
pub struct NewPlaylist {
    pub title: String,
    pub introduction: String,
    pub style: String,
}

/// Playlist Repository Port
#[async_trait]
pub trait PlaylistRepositoryPort: Send + Sync {
    async fn find_page(
        &self,
        filter: &PlaylistFilter,
        page: Pagination,
    ) -> Result<Page<PlaylistView>, RepositoryError>;

    /// 管理端分页（完整信息）
    async fn find_record_page(
        &self,
        filter: &PlaylistFilter,
        page: Pagination,
    ) -> Result<Page<PlaylistRecord>, RepositoryError>;

    /// 用户收藏的歌单，按收藏时间倒序
    async fn find_favorite_page(
        &self,
        user_id: u64,
        filter: &PlaylistFilter,
        page: Pagination,
    ) -> Result<Page<PlaylistView>, RepositoryError>;

    /// 歌单详情（含歌曲）
    async fn find_detail(&self, id: u64) -> Result<Option<PlaylistDetailView>, RepositoryError>;

    async fn find_random(
        &self,
        limit: usize,
        exclude: &[u64],
    ) -> Result<Vec<PlaylistView>, RepositoryError>;

    async fn find_styles_by_ids(&self, ids: &[u64]) -> Result<Vec<String>, RepositoryError>;

    async fn find_by_styles(
        &self,
        styles: &[String],
        exclude: &[u64],
        limit: usize,
    ) -> Result<Vec<PlaylistView>, RepositoryError>;

    async fn find_by_id(&self, id: u64) -> Result<Option<PlaylistRecord>, RepositoryError>;

    async fn find_by_title(&self, title: &str) -> Result<Option<PlaylistRecord>, RepositoryError>;

    async fn create(&self, playlist: &NewPlaylist) -> Result<u64, RepositoryError>;

    async fn update(&self, playlist: &PlaylistRecord) -> Result<(), RepositoryError>;

    async fn update_cover(&self, id: u64, cover_url: &str) -> Result<(), RepositoryError>;

    /// 绑定歌曲到歌单，已绑定的忽略
    async fn add_songs(&self, playlist_id: u64, song_ids: &[u64]) -> Result<(), RepositoryError>;

    async fn delete_by_ids(&self, ids: &[u64]) -> Result<u64, RepositoryError>;

    /// 歌单总数，style 精确匹配
    async fn count_by_style(&self, style: Option<&str>) -> Result<u64, RepositoryError>;
}

// ============================================================================
// Artist Repository
// ============================================================================

/// 歌手筛选条件
#[derive(Debug, Clone, Default)]
pub struct ArtistFilter {
    pub artist_name: Option<String>,
    pub gender: Option<Gender>,
    pub area: Option<String>,
}

/// 新建歌手
#[derive(Debug, Clone)]
pub struct NewArtist {
    pub name: String,
    pub gender: Gender,
    pub birth: Option<NaiveDate>,
    pub area: String,
    pub introduction: String,
}

/// Artist Repository Port
#[async_trait]
pub trait ArtistRepositoryPort: Send + Sync {
    async fn find_page(
        &self,
        filter: &ArtistFilter,
        page: Pagination,
    ) -> Result<Page<ArtistView>, RepositoryError>;

    /// 全部歌手名（id 倒序）
    async fn find_names(&self) -> Result<Vec<ArtistNameView>, RepositoryError>;

    async fn find_random(&self, limit: usize) -> Result<Vec<ArtistView>, RepositoryError>;

    /// 歌手详情（含歌曲，id 倒序）
    async fn find_detail(&self, id: u64) -> Result<Option<ArtistDetailView>, RepositoryError>;

    async fn find_by_id(&self, id: u64) -> Result<Option<ArtistRecord>, RepositoryError>;

    async fn exists_by_name(&self, name: &str) -> Result<bool, RepositoryError>;

    async fn create(&self, artist: &NewArtist) -> Result<u64, RepositoryError>;

    async fn update(&self, artist: &ArtistRecord) -> Result<(), RepositoryError>;

    async fn update_avatar(&self, id: u64, avatar_url: &str) -> Result<(), RepositoryError>;

    async fn delete_by_ids(&self, ids: &[u64]) -> Result<u64, RepositoryError>;

    /// 歌手总数，gender 与 area 精确匹配
    async fn count(&self, gender: Option<Gender>, area: Option<&str>)
        -> Result<u64, RepositoryError>;
}

// ============================================================================
// Favorite Repository
// ============================================================================

/// Favorite Repository Port
#[async_trait]
pub trait FavoriteRepositoryPort: Send + Sync {
    /// 用户收藏的 ID，升序
    async fn find_ids(&self, user_id: u64, kind: FavoriteKind) -> Result<Vec<u64>, RepositoryError>;

    async fn exists(&self, user_id: u64, target: FavoriteTarget) -> Result<bool, RepositoryError>;

    async fn add(&self, user_id: u64, target: FavoriteTarget) -> Result<(), RepositoryError>;

    /// 取消收藏，返回是否存在
    async fn remove(&self, user_id: u64, target: FavoriteTarget) -> Result<bool, RepositoryError>;

    async fn delete_by_user(&self, user_id: u64) -> Result<(), RepositoryError>;
}

// ============================================================================
// User Repository
// ============================================================================

/// 用户实体
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: u64,
    pub username: String,
    pub avatar_url: String,
    pub email: String,
    pub phone: String,
    pub introduction: String,
}

/// User Repository Port
#[async_trait]
pub trait UserRepositoryPort: Send + Sync {
    async fn find_by_id(&self, id: u64) -> Result<Option<UserRecord>, RepositoryError>;

    async fn find_id_by_username(&self, username: &str) -> Result<Option<u64>, RepositoryError>;

    async fn find_id_by_email(&self, email: &str) -> Result<Option<u64>, RepositoryError>;

    async fn create(&self, username: &str, avatar_url: &str) -> Result<u64, RepositoryError>;

    async fn update_profile(&self, id: u64, profile: &UserProfile) -> Result<(), RepositoryError>;

    async fn update_avatar(&self, id: u64, avatar_url: &str) -> Result<(), RepositoryError>;

    async fn delete(&self, id: u64) -> Result<(), RepositoryError>;

    async fn count(&self) -> Result<u64, RepositoryError>;
}

// ============================================================================
// Comment Repository
// ============================================================================

/// 评论实体
#[derive(Debug, Clone, PartialEq)]
pub struct CommentRecord {
    pub id: u64,
    pub user_id: u64,
    pub target: CommentTarget,
    pub like_count: u64,
}

/// Comment Repository Port
#[async_trait]
pub trait CommentRepositoryPort: Send + Sync {
    /// 对象下的评论（id 倒序，带评论者名称与头像）
    async fn find_by_target(&self, target: CommentTarget)
        -> Result<Vec<CommentView>, RepositoryError>;

    async fn find_by_id(&self, id: u64) -> Result<Option<CommentRecord>, RepositoryError>;

    async fn create(
        &self,
        user_id: u64,
        target: CommentTarget,
        content: &str,
    ) -> Result<u64, RepositoryError>;

    async fn delete(&self, id: u64) -> Result<(), RepositoryError>;

    async fn increment_likes(&self, id: u64) -> Result<(), RepositoryError>;

    /// 点赞数大于 0 时减一，返回是否发生变化
    async fn decrement_likes(&self, id: u64) -> Result<bool, RepositoryError>;

    async fn delete_by_user(&self, user_id: u64) -> Result<(), RepositoryError>;
}

// ============================================================================
// Banner Repository
// ============================================================================

/// 轮播图实体
#[derive(Debug, Clone, PartialEq)]
pub struct BannerRecord {
    pub id: u64,
    pub banner_url: String,
    pub status: BannerStatus,
}

/// Banner Repository Port
#[async_trait]
pub trait BannerRepositoryPort: Send + Sync {
    /// 启用中的轮播图
    async fn find_enabled(&self) -> Result<Vec<BannerView>, RepositoryError>;

    async fn find_by_id(&self, id: u64) -> Result<Option<BannerRecord>, RepositoryError>;

    /// 管理端分页（id 倒序），status 为空时不过滤
    async fn find_page(
        &self,
        status: Option<BannerStatus>,
        page: Pagination,
    ) -> Result<Page<BannerAdminView>, RepositoryError>;

    async fn find_by_ids(&self, ids: &[u64]) -> Result<Vec<BannerRecord>, RepositoryError>;

    async fn create(&self, banner_url: &str) -> Result<u64, RepositoryError>;

    async fn update_url(&self, id: u64, banner_url: &str) -> Result<(), RepositoryError>;

    async fn update_status(&self, id: u64, status: BannerStatus) -> Result<(), RepositoryError>;

    async fn delete_by_ids(&self, ids: &[u64]) -> Result<u64, RepositoryError>;
}
