//! Artist HTTP Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::ports::{ArtistDetailView, ArtistView};
use crate::application::{GetArtistDetail, GetRandomArtists};
use crate::domain::catalog::Page;
use crate::infrastructure::http::dto::{ApiResponse, ArtistPageRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::MaybeIdentity;
use crate::infrastructure::http::state::AppState;

/// 分页查询歌手
pub async fn get_all_artists(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ArtistPageRequest>,
) -> Result<Json<ApiResponse<Page<ArtistView>>>, ApiError> {
    let page = state.list_artists_handler.handle(req.into()).await?;
    Ok(Json(ApiResponse::success(page)))
}

/// 随机歌手（不缓存）
pub async fn get_random_artists(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ArtistView>>>, ApiError> {
    let artists = state.random_artists_handler.handle(GetRandomArtists).await?;
    Ok(Json(ApiResponse::success(artists)))
}

/// 歌手详情
pub async fn get_artist_detail(
    State(state): State<Arc<AppState>>,
    viewer: MaybeIdentity,
    Path(artist_id): Path<u64>,
) -> Result<Json<ApiResponse<ArtistDetailView>>, ApiError> {
    let detail = state
        .get_artist_detail_handler
        .handle(GetArtistDetail { artist_id }, viewer.identity())
        .await?;
    Ok(Json(ApiResponse::success(detail)))
}
