//! Playlist HTTP Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::ports::{PlaylistDetailView, PlaylistView};
use crate::application::{GetPlaylistDetail, GetRecommendedPlaylists};
use crate::domain::catalog::Page;
use crate::infrastructure::http::dto::{ApiResponse, PlaylistPageRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::MaybeIdentity;
use crate::infrastructure::http::state::AppState;

/// 分页查询歌单
pub async fn get_all_playlists(
    State(state): State<Arc<AppState>>,
    viewer: MaybeIdentity,
    Json(req): Json<PlaylistPageRequest>,
) -> Result<Json<ApiResponse<Page<PlaylistView>>>, ApiError> {
    let page = state
        .list_playlists_handler
        .handle(req.into(), viewer.identity())
        .await?;
    Ok(Json(ApiResponse::success(page)))
}

/// 推荐歌单
pub async fn get_recommended_playlists(
    State(state): State<Arc<AppState>>,
    viewer: MaybeIdentity,
) -> Result<Json<ApiResponse<Vec<PlaylistView>>>, ApiError> {
    let playlists = state
        .recommended_playlists_handler
        .handle(GetRecommendedPlaylists, viewer.identity())
        .await?;
    Ok(Json(ApiResponse::success(playlists)))
}

/// 歌单详情
pub async fn get_playlist_detail(
    State(state): State<Arc<AppState>>,
    viewer: MaybeIdentity,
    Path(playlist_id): Path<u64>,
) -> Result<Json<ApiResponse<PlaylistDetailView>>, ApiError> {
    let detail = state
        .get_playlist_detail_handler
        .handle(GetPlaylistDetail { playlist_id }, viewer.identity())
        .await?;
    Ok(Json(ApiResponse::success(detail)))
}
