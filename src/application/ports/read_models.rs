//! Read Models - 查询侧视图
//!
//! 仓储直接投影出的只读视图，序列化为 camelCase JSON，
//! 同时也是查询缓存中保存的值

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::{BannerStatus, Gender, LikeStatus};
use crate::domain::recommendation::Recommendable;

/// 歌曲列表项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongView {
    pub song_id: u64,
    pub song_name: String,
    pub artist_name: String,
    pub album: String,
    pub duration: String,
    pub cover_url: String,
    pub audio_url: String,
    #[serde(default)]
    pub like_status: LikeStatus,
    pub release_time: Option<NaiveDate>,
}

impl Recommendable for SongView {
    fn item_id(&self) -> u64 {
        self.song_id
    }

    fn set_like_status(&mut self, status: LikeStatus) {
        self.like_status = status;
    }
}

/// 歌曲详情
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongDetailView {
    pub song_id: u64,
    pub song_name: String,
    pub artist_name: String,
    pub album: String,
    pub lyric: String,
    pub duration: String,
    pub cover_url: String,
    pub audio_url: String,
    pub release_time: Option<NaiveDate>,
    #[serde(default)]
    pub like_status: LikeStatus,
    #[serde(default)]
    pub comments: Vec<CommentView>,
}

/// 管理端歌曲列表项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongAdminView {
    pub song_id: u64,
    pub artist_name: String,
    pub song_name: String,
    pub album: String,
    pub lyric: String,
    pub duration: String,
    pub style: String,
    pub cover_url: String,
    pub audio_url: String,
    pub release_time: Option<NaiveDate>,
}

/// 歌单列表项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistView {
    pub playlist_id: u64,
    pub title: String,
    pub cover_url: String,
    #[serde(default)]
    pub like_status: LikeStatus,
}

impl Recommendable for PlaylistView {
    fn item_id(&self) -> u64 {
        self.playlist_id
    }

    fn set_like_status(&mut self, status: LikeStatus) {
        self.like_status = status;
    }
}

/// 歌单详情
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistDetailView {
    pub playlist_id: u64,
    pub title: String,
    pub cover_url: String,
    pub introduction: String,
    pub songs: Vec<SongView>,
    #[serde(default)]
    pub like_status: LikeStatus,
    #[serde(default)]
    pub comments: Vec<CommentView>,
}

/// 歌单完整信息（管理端）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistRecord {
    pub playlist_id: u64,
    pub title: String,
    pub cover_url: String,
    pub introduction: String,
    pub style: String,
}

/// 歌手列表项
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistView {
    pub artist_id: u64,
    pub artist_name: String,
    pub avatar: String,
}

/// 歌手名（管理端下拉）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistNameView {
    pub artist_id: u64,
    pub artist_name: String,
}

/// 歌手完整信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistRecord {
    pub artist_id: u64,
    pub artist_name: String,
    pub gender: Gender,
    pub avatar: String,
    pub birth: Option<NaiveDate>,
    pub area: String,
    pub introduction: String,
}

/// 歌手详情（含歌曲）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistDetailView {
    pub artist_id: u64,
    pub artist_name: String,
    pub gender: Gender,
    pub avatar: String,
    pub birth: Option<NaiveDate>,
    pub area: String,
    pub introduction: String,
    pub songs: Vec<SongView>,
}

/// 轮播图
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerView {
    pub banner_id: u64,
    pub banner_url: String,
}

/// 轮播图（管理端，含状态）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerAdminView {
    pub banner_id: u64,
    pub banner_url: String,
    pub status: BannerStatus,
}

/// 评论，按 id 倒序挂在歌曲/歌单详情下
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub comment_id: u64,
    pub username: String,
    pub user_avatar: String,
    pub content: String,
    pub create_time: NaiveDate,
    pub like_count: u64,
}

/// 当前用户资料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoView {
    pub user_id: u64,
    pub username: String,
    pub phone: String,
    pub email: String,
    pub user_avatar: String,
    pub introduction: String,
}
