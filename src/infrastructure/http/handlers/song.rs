//! Song HTTP Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::ports::{SongDetailView, SongView};
use crate::application::{GetRecommendedSongs, GetSongDetail};
use crate::domain::catalog::Page;
use crate::infrastructure::http::dto::{ApiResponse, SongPageRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::MaybeIdentity;
use crate::infrastructure::http::state::AppState;

/// 分页查询歌曲
pub async fn get_all_songs(
    State(state): State<Arc<AppState>>,
    viewer: MaybeIdentity,
    Json(req): Json<SongPageRequest>,
) -> Result<Json<ApiResponse<Page<SongView>>>, ApiError> {
    let page = state
        .list_songs_handler
        .handle(req.into(), viewer.identity())
        .await?;
    Ok(Json(ApiResponse::success(page)))
}

/// 推荐歌曲
pub async fn get_recommended_songs(
    State(state): State<Arc<AppState>>,
    viewer: MaybeIdentity,
) -> Result<Json<ApiResponse<Vec<SongView>>>, ApiError> {
    let songs = state
        .recommended_songs_handler
        .handle(GetRecommendedSongs, viewer.identity())
        .await?;
    Ok(Json(ApiResponse::success(songs)))
}

/// 歌曲详情
pub async fn get_song_detail(
    State(state): State<Arc<AppState>>,
    viewer: MaybeIdentity,
    Path(song_id): Path<u64>,
) -> Result<Json<ApiResponse<SongDetailView>>, ApiError> {
    let detail = state
        .get_song_detail_handler
        .handle(GetSongDetail { song_id }, viewer.identity())
        .await?;
    Ok(Json(ApiResponse::success(detail)))
}
