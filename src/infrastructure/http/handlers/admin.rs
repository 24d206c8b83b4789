//! Admin HTTP Handlers
//!
//! 所有接口要求管理员身份（RequireAdmin）

use axum::{
    extract::{Multipart, Path, Query, State},
    Json,
};
use std::sync::Arc;

use super::upload::read_upload;
use crate::application::ports::{ArtistNameView, BannerAdminView, PlaylistRecord, SongAdminView};
use crate::application::{
    AddBanner, CountUsers, DeleteArtists, DeleteBanners, DeletePlaylists, DeleteSongs,
    ListArtistNames, UpdateArtistAvatar, UpdateBanner, UpdateBannerStatus, UpdatePlaylistCover,
    UpdateSongAudio, UpdateSongCover,
};
use crate::domain::catalog::Page;
use crate::infrastructure::http::dto::{
    AddArtistRequest, AddPlaylistRequest, AddSongRequest, ApiResponse, ArtistCountQuery,
    ArtistSongPageRequest, BannerPageRequest, BannerStatusQuery, BindPlaylistSongsRequest,
    CreatedResponse, PlaylistPageRequest, StyleCountQuery, UpdateArtistRequest,
    UpdatePlaylistRequest, UpdateSongRequest, UploadResponse,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::RequireAdmin;
use crate::infrastructure::http::state::AppState;

type Created = Result<Json<ApiResponse<CreatedResponse>>, ApiError>;
type Uploaded = Result<Json<ApiResponse<UploadResponse>>, ApiError>;
type Done = Result<Json<ApiResponse<()>>, ApiError>;
type Counted = Result<Json<ApiResponse<u64>>, ApiError>;

fn created(id: u64) -> Json<ApiResponse<CreatedResponse>> {
    Json(ApiResponse::success(CreatedResponse { id }))
}

fn uploaded(url: String) -> Json<ApiResponse<UploadResponse>> {
    Json(ApiResponse::success(UploadResponse { url }))
}

fn deleted(count: u64) -> Json<ApiResponse<()>> {
    Json(ApiResponse::ok(format!("已删除 {} 条", count)))
}

// ============================================================================
// Songs
// ============================================================================

pub async fn get_all_songs_by_artist(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Json(req): Json<ArtistSongPageRequest>,
) -> Result<Json<ApiResponse<Page<SongAdminView>>>, ApiError> {
    let page = state.list_songs_by_artist_handler.handle(req.into()).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn add_song(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Json(req): Json<AddSongRequest>,
) -> Created {
    let id = state.add_song_handler.handle(req.into()).await?;
    Ok(created(id))
}

pub async fn update_song(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Json(req): Json<UpdateSongRequest>,
) -> Done {
    state.update_song_handler.handle(req.into()).await?;
    Ok(Json(ApiResponse::ok("更新成功")))
}

pub async fn update_song_cover(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Path(song_id): Path<u64>,
    multipart: Multipart,
) -> Uploaded {
    let upload = read_upload(multipart).await?;
    let url = state
        .update_song_cover_handler
        .handle(UpdateSongCover {
            song_id,
            file_name: upload.file_name,
            data: upload.data,
        })
        .await?;
    Ok(uploaded(url))
}

/// 音频文件，可附带 `duration` 文本字段
pub async fn update_song_audio(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Path(song_id): Path<u64>,
    multipart: Multipart,
) -> Uploaded {
    let mut upload = read_upload(multipart).await?;
    let duration = upload.fields.remove("duration").unwrap_or_default();
    let url = state
        .update_song_audio_handler
        .handle(UpdateSongAudio {
            song_id,
            file_name: upload.file_name,
            data: upload.data,
            duration,
        })
        .await?;
    Ok(uploaded(url))
}

pub async fn delete_song(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Path(song_id): Path<u64>,
) -> Done {
    let count = state
        .delete_songs_handler
        .handle(DeleteSongs {
            song_ids: vec![song_id],
        })
        .await?;
    Ok(deleted(count))
}

pub async fn delete_songs(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Json(song_ids): Json<Vec<u64>>,
) -> Done {
    let count = state
        .delete_songs_handler
        .handle(DeleteSongs { song_ids })
        .await?;
    Ok(deleted(count))
}

// ============================================================================
// Artists
// ============================================================================

pub async fn get_all_artist_names(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
) -> Result<Json<ApiResponse<Vec<ArtistNameView>>>, ApiError> {
    let names = state.list_artist_names_handler.handle(ListArtistNames).await?;
    Ok(Json(ApiResponse::success(names)))
}

pub async fn add_artist(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Json(req): Json<AddArtistRequest>,
) -> Created {
    let id = state.add_artist_handler.handle(req.into()).await?;
    Ok(created(id))
}

pub async fn update_artist(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Json(req): Json<UpdateArtistRequest>,
) -> Done {
    state.update_artist_handler.handle(req.into()).await?;
    Ok(Json(ApiResponse::ok("更新成功")))
}

pub async fn update_artist_avatar(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Path(artist_id): Path<u64>,
    multipart: Multipart,
) -> Uploaded {
    let upload = read_upload(multipart).await?;
    let url = state
        .update_artist_avatar_handler
        .handle(UpdateArtistAvatar {
            artist_id,
            file_name: upload.file_name,
            data: upload.data,
        })
        .await?;
    Ok(uploaded(url))
}

pub async fn delete_artist(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Path(artist_id): Path<u64>,
) -> Done {
    let count = state
        .delete_artists_handler
        .handle(DeleteArtists {
            artist_ids: vec![artist_id],
        })
        .await?;
    Ok(deleted(count))
}

pub async fn delete_artists(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Json(artist_ids): Json<Vec<u64>>,
) -> Done {
    let count = state
        .delete_artists_handler
        .handle(DeleteArtists { artist_ids })
        .await?;
    Ok(deleted(count))
}

// ============================================================================
// Playlists
// ============================================================================

pub async fn get_all_playlists(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Json(req): Json<PlaylistPageRequest>,
) -> Result<Json<ApiResponse<Page<PlaylistRecord>>>, ApiError> {
    let page = state.list_playlist_records_handler.handle(req.into()).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn add_playlist(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Json(req): Json<AddPlaylistRequest>,
) -> Created {
    let id = state.add_playlist_handler.handle(req.into()).await?;
    Ok(created(id))
}

pub async fn update_playlist(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Json(req): Json<UpdatePlaylistRequest>,
) -> Done {
    state.update_playlist_handler.handle(req.into()).await?;
    Ok(Json(ApiResponse::ok("更新成功")))
}

pub async fn update_playlist_cover(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Path(playlist_id): Path<u64>,
    multipart: Multipart,
) -> Uploaded {
    let upload = read_upload(multipart).await?;
    let url = state
        .update_playlist_cover_handler
        .handle(UpdatePlaylistCover {
            playlist_id,
            file_name: upload.file_name,
            data: upload.data,
        })
        .await?;
    Ok(uploaded(url))
}

pub async fn bind_playlist_songs(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Json(req): Json<BindPlaylistSongsRequest>,
) -> Done {
    state.bind_playlist_songs_handler.handle(req.into()).await?;
    Ok(Json(ApiResponse::ok("绑定成功")))
}

pub async fn delete_playlist(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Path(playlist_id): Path<u64>,
) -> Done {
    let count = state
        .delete_playlists_handler
        .handle(DeletePlaylists {
            playlist_ids: vec![playlist_id],
        })
        .await?;
    Ok(deleted(count))
}

pub async fn delete_playlists(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Json(playlist_ids): Json<Vec<u64>>,
) -> Done {
    let count = state
        .delete_playlists_handler
        .handle(DeletePlaylists { playlist_ids })
        .await?;
    Ok(deleted(count))
}

// ============================================================================
// Banners
// ============================================================================

pub async fn add_banner(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    multipart: Multipart,
) -> Created {
    let upload = read_upload(multipart).await?;
    let id = state
        .add_banner_handler
        .handle(AddBanner {
            file_name: upload.file_name,
            data: upload.data,
        })
        .await?;
    Ok(created(id))
}

pub async fn get_all_banners(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Json(req): Json<BannerPageRequest>,
) -> Result<Json<ApiResponse<Page<BannerAdminView>>>, ApiError> {
    let page = state.list_all_banners_handler.handle(req.into()).await?;
    Ok(Json(ApiResponse::success(page)))
}

pub async fn update_banner(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Path(banner_id): Path<u64>,
    multipart: Multipart,
) -> Uploaded {
    let upload = read_upload(multipart).await?;
    let url = state
        .update_banner_handler
        .handle(UpdateBanner {
            banner_id,
            file_name: upload.file_name,
            data: upload.data,
        })
        .await?;
    Ok(uploaded(url))
}

/// 状态从查询参数读取：`?status=0|1`
pub async fn update_banner_status(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Path(banner_id): Path<u64>,
    Query(query): Query<BannerStatusQuery>,
) -> Done {
    state
        .update_banner_status_handler
        .handle(UpdateBannerStatus {
            banner_id,
            status: query.status,
        })
        .await?;
    Ok(Json(ApiResponse::ok("更新成功")))
}

pub async fn delete_banner(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Path(banner_id): Path<u64>,
) -> Done {
    let count = state
        .delete_banners_handler
        .handle(DeleteBanners {
            banner_ids: vec![banner_id],
        })
        .await?;
    Ok(deleted(count))
}

pub async fn delete_banners(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Json(banner_ids): Json<Vec<u64>>,
) -> Done {
    let count = state
        .delete_banners_handler
        .handle(DeleteBanners { banner_ids })
        .await?;
    Ok(deleted(count))
}

// ============================================================================
// Counts
// ============================================================================

pub async fn get_all_songs_count(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Query(query): Query<StyleCountQuery>,
) -> Counted {
    let total = state.count_songs_handler.handle(query.into()).await?;
    Ok(Json(ApiResponse::success(total)))
}

pub async fn get_all_artists_count(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Query(query): Query<ArtistCountQuery>,
) -> Counted {
    let total = state.count_artists_handler.handle(query.into()).await?;
    Ok(Json(ApiResponse::success(total)))
}

pub async fn get_all_playlists_count(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
    Query(query): Query<StyleCountQuery>,
) -> Counted {
    let total = state.count_playlists_handler.handle(query.into()).await?;
    Ok(Json(ApiResponse::success(total)))
}

pub async fn get_all_users_count(
    State(state): State<Arc<AppState>>,
    _admin: RequireAdmin,
) -> Counted {
    let total = state.count_users_handler.handle(CountUsers).await?;
    Ok(Json(ApiResponse::success(total)))
}
