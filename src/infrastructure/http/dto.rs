//! Data Transfer Objects
//!
//! 请求体统一 camelCase，响应统一包在 ApiResponse 中

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::{
    AddArtist, AddComment, AddPlaylist, AddSong, BindPlaylistSongs, CountArtists, CountPlaylists,
    CountSongs, ListAllBanners, ListArtists, ListFavoritePlaylists, ListFavoriteSongs,
    ListPlaylistRecords, ListPlaylists, ListSongs, ListSongsByArtist, UpdateArtist,
    UpdatePlaylist, UpdateSong, UpdateUserInfo,
};
use crate::domain::catalog::{BannerStatus, CommentTarget, Gender};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 业务码：0 成功，1 失败
pub const CODE_SUCCESS: i32 = 0;
pub const CODE_FAILURE: i32 = 1;

/// 统一 API 响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            code: CODE_SUCCESS,
            message: "操作成功".to_string(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// 成功但无数据
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            code: CODE_SUCCESS,
            message: message.into(),
            data: None,
        }
    }

    /// 失败响应
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            code: CODE_FAILURE,
            message: message.into(),
            data: None,
        }
    }
}

// ============================================================================
// Song DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongPageRequest {
    pub page_num: u32,
    pub page_size: u32,
    pub song_name: Option<String>,
    pub artist_name: Option<String>,
    pub album: Option<String>,
}

impl From<SongPageRequest> for ListSongs {
    fn from(req: SongPageRequest) -> Self {
        ListSongs {
            page_num: req.page_num,
            page_size: req.page_size,
            song_name: req.song_name,
            artist_name: req.artist_name,
            album: req.album,
        }
    }
}

impl SongPageRequest {
    pub fn into_favorites(self, user_id: u64) -> ListFavoriteSongs {
        ListFavoriteSongs {
            user_id,
            page_num: self.page_num,
            page_size: self.page_size,
            song_name: self.song_name,
            artist_name: self.artist_name,
            album: self.album,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistSongPageRequest {
    pub page_num: u32,
    pub page_size: u32,
    pub artist_id: Option<u64>,
    pub song_name: Option<String>,
    pub album: Option<String>,
}

impl From<ArtistSongPageRequest> for ListSongsByArtist {
    fn from(req: ArtistSongPageRequest) -> Self {
        ListSongsByArtist {
            page_num: req.page_num,
            page_size: req.page_size,
            artist_id: req.artist_id,
            song_name: req.song_name,
            album: req.album,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSongRequest {
    pub artist_id: u64,
    pub song_name: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub style: String,
    pub release_time: Option<NaiveDate>,
}

impl From<AddSongRequest> for AddSong {
    fn from(req: AddSongRequest) -> Self {
        AddSong {
            artist_id: req.artist_id,
            song_name: req.song_name,
            album: req.album,
            style: req.style,
            release_time: req.release_time,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSongRequest {
    pub song_id: u64,
    pub artist_id: u64,
    pub song_name: String,
    #[serde(default)]
    pub album: String,
    pub lyric: Option<String>,
    #[serde(default)]
    pub style: String,
    pub release_time: Option<NaiveDate>,
}

impl From<UpdateSongRequest> for UpdateSong {
    fn from(req: UpdateSongRequest) -> Self {
        UpdateSong {
            song_id: req.song_id,
            artist_id: req.artist_id,
            song_name: req.song_name,
            album: req.album,
            lyric: req.lyric,
            style: req.style,
            release_time: req.release_time,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongIdQuery {
    pub song_id: u64,
}

// ============================================================================
// Playlist DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistPageRequest {
    pub page_num: u32,
    pub page_size: u32,
    pub title: Option<String>,
    pub style: Option<String>,
}

impl From<PlaylistPageRequest> for ListPlaylists {
    fn from(req: PlaylistPageRequest) -> Self {
        ListPlaylists {
            page_num: req.page_num,
            page_size: req.page_size,
            title: req.title,
            style: req.style,
        }
    }
}

impl From<PlaylistPageRequest> for ListPlaylistRecords {
    fn from(req: PlaylistPageRequest) -> Self {
        ListPlaylistRecords {
            page_num: req.page_num,
            page_size: req.page_size,
            title: req.title,
            style: req.style,
        }
    }
}

impl PlaylistPageRequest {
    pub fn into_favorites(self, user_id: u64) -> ListFavoritePlaylists {
        ListFavoritePlaylists {
            user_id,
            page_num: self.page_num,
            page_size: self.page_size,
            title: self.title,
            style: self.style,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPlaylistRequest {
    pub title: String,
    #[serde(default)]
    pub introduction: String,
    #[serde(default)]
    pub style: String,
}

impl From<AddPlaylistRequest> for AddPlaylist {
    fn from(req: AddPlaylistRequest) -> Self {
        AddPlaylist {
            title: req.title,
            introduction: req.introduction,
            style: req.style,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlaylistRequest {
    pub playlist_id: u64,
    pub title: String,
    #[serde(default)]
    pub introduction: String,
    #[serde(default)]
    pub style: String,
}

impl From<UpdatePlaylistRequest> for UpdatePlaylist {
    fn from(req: UpdatePlaylistRequest) -> Self {
        UpdatePlaylist {
            playlist_id: req.playlist_id,
            title: req.title,
            introduction: req.introduction,
            style: req.style,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BindPlaylistSongsRequest {
    pub playlist_id: u64,
    pub song_ids: Vec<u64>,
}

impl From<BindPlaylistSongsRequest> for BindPlaylistSongs {
    fn from(req: BindPlaylistSongsRequest) -> Self {
        BindPlaylistSongs {
            playlist_id: req.playlist_id,
            song_ids: req.song_ids,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistIdQuery {
    pub playlist_id: u64,
}

// ============================================================================
// Artist DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistPageRequest {
    pub page_num: u32,
    pub page_size: u32,
    pub artist_name: Option<String>,
    pub gender: Option<Gender>,
    pub area: Option<String>,
}

impl From<ArtistPageRequest> for ListArtists {
    fn from(req: ArtistPageRequest) -> Self {
        ListArtists {
            page_num: req.page_num,
            page_size: req.page_size,
            artist_name: req.artist_name,
            gender: req.gender,
            area: req.area,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddArtistRequest {
    pub artist_name: String,
    pub gender: Gender,
    pub birth: Option<NaiveDate>,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub introduction: String,
}

impl From<AddArtistRequest> for AddArtist {
    fn from(req: AddArtistRequest) -> Self {
        AddArtist {
            artist_name: req.artist_name,
            gender: req.gender,
            birth: req.birth,
            area: req.area,
            introduction: req.introduction,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArtistRequest {
    pub artist_id: u64,
    pub artist_name: String,
    pub gender: Gender,
    pub birth: Option<NaiveDate>,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub introduction: String,
}

impl From<UpdateArtistRequest> for UpdateArtist {
    fn from(req: UpdateArtistRequest) -> Self {
        UpdateArtist {
            artist_id: req.artist_id,
            artist_name: req.artist_name,
            gender: req.gender,
            birth: req.birth,
            area: req.area,
            introduction: req.introduction,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistCountQuery {
    pub gender: Option<Gender>,
    pub area: Option<String>,
}

impl From<ArtistCountQuery> for CountArtists {
    fn from(query: ArtistCountQuery) -> Self {
        CountArtists {
            gender: query.gender,
            area: query.area,
        }
    }
}

/// 歌曲、歌单统计的风格筛选
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleCountQuery {
    pub style: Option<String>,
}

impl From<StyleCountQuery> for CountSongs {
    fn from(query: StyleCountQuery) -> Self {
        CountSongs { style: query.style }
    }
}

impl From<StyleCountQuery> for CountPlaylists {
    fn from(query: StyleCountQuery) -> Self {
        CountPlaylists { style: query.style }
    }
}

// ============================================================================
// Banner DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerPageRequest {
    pub page_num: u32,
    pub page_size: u32,
    pub status: Option<BannerStatus>,
}

impl From<BannerPageRequest> for ListAllBanners {
    fn from(req: BannerPageRequest) -> Self {
        ListAllBanners {
            page_num: req.page_num,
            page_size: req.page_size,
            status: req.status,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BannerStatusQuery {
    pub status: BannerStatus,
}

// ============================================================================
// Comment DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongCommentRequest {
    pub song_id: u64,
    pub content: String,
}

impl SongCommentRequest {
    pub fn into_command(self, user_id: u64) -> AddComment {
        AddComment {
            user_id,
            target: CommentTarget::Song(self.song_id),
            content: self.content,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistCommentRequest {
    pub playlist_id: u64,
    pub content: String,
}

impl PlaylistCommentRequest {
    pub fn into_command(self, user_id: u64) -> AddComment {
        AddComment {
            user_id,
            target: CommentTarget::Playlist(self.playlist_id),
            content: self.content,
        }
    }
}

// ============================================================================
// User DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserInfoRequest {
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub introduction: String,
}

impl UpdateUserInfoRequest {
    pub fn into_command(self, user_id: u64) -> UpdateUserInfo {
        UpdateUserInfo {
            user_id,
            username: self.username,
            email: self.email,
            phone: self.phone,
            introduction: self.introduction,
        }
    }
}

// ============================================================================
// Common
// ============================================================================

/// 新建成功后返回的 ID
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedResponse {
    pub id: u64,
}

/// 上传成功后返回的 URL
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_omitted_when_absent() {
        let json = serde_json::to_value(ApiResponse::failure("未找到相关数据")).unwrap();
        assert_eq!(json["code"], 1);
        assert!(json.get("data").is_none());

        let json = serde_json::to_value(ApiResponse::success(vec![1, 2])).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"][1], 2);
    }

    #[test]
    fn test_page_request_optional_filters() {
        let req: SongPageRequest =
            serde_json::from_str(r#"{"pageNum":1,"pageSize":10,"artistName":"Alice"}"#).unwrap();
        let query = ListSongs::from(req);
        assert_eq!(query.artist_name.as_deref(), Some("Alice"));
        assert!(query.song_name.is_none());
    }

    #[test]
    fn test_comment_request_targets() {
        let req: PlaylistCommentRequest =
            serde_json::from_str(r#"{"playlistId":3,"content":"好听"}"#).unwrap();
        let command = req.into_command(9);
        assert_eq!(command.target, CommentTarget::Playlist(3));
        assert_eq!(command.user_id, 9);
    }

    #[test]
    fn test_banner_status_is_numeric() {
        let req: BannerPageRequest =
            serde_json::from_str(r#"{"pageNum":1,"pageSize":5,"status":1}"#).unwrap();
        assert_eq!(ListAllBanners::from(req).status, Some(BannerStatus::Disabled));
        assert!(serde_json::from_str::<BannerPageRequest>(
            r#"{"pageNum":1,"pageSize":5,"status":7}"#
        )
        .is_err());
    }
}
