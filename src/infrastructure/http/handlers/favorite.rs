//! Favorite HTTP Handlers

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::application::ports::{PlaylistView, SongView};
use crate::application::{CancelCollect, Collect};
use crate::domain::catalog::{FavoriteTarget, Page};
use crate::infrastructure::http::dto::{
    ApiResponse, PlaylistIdQuery, PlaylistPageRequest, SongIdQuery, SongPageRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::RequireUser;
use crate::infrastructure::http::state::AppState;

/// 收藏的歌曲
pub async fn get_favorite_songs(
    State(state): State<Arc<AppState>>,
    RequireUser(caller): RequireUser,
    Json(req): Json<SongPageRequest>,
) -> Result<Json<ApiResponse<Page<SongView>>>, ApiError> {
    let page = state
        .favorite_songs_handler
        .handle(req.into_favorites(caller.identity.user_id))
        .await?;
    Ok(Json(ApiResponse::success(page)))
}

/// 收藏的歌单
pub async fn get_favorite_playlists(
    State(state): State<Arc<AppState>>,
    RequireUser(caller): RequireUser,
    Json(req): Json<PlaylistPageRequest>,
) -> Result<Json<ApiResponse<Page<PlaylistView>>>, ApiError> {
    let page = state
        .favorite_playlists_handler
        .handle(req.into_favorites(caller.identity.user_id))
        .await?;
    Ok(Json(ApiResponse::success(page)))
}

async fn collect(
    state: &AppState,
    user_id: u64,
    target: FavoriteTarget,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .collect_handler
        .handle(Collect { user_id, target })
        .await?;
    Ok(Json(ApiResponse::ok("收藏成功")))
}

async fn cancel_collect(
    state: &AppState,
    user_id: u64,
    target: FavoriteTarget,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .cancel_collect_handler
        .handle(CancelCollect { user_id, target })
        .await?;
    Ok(Json(ApiResponse::ok("取消收藏成功")))
}

pub async fn collect_song(
    State(state): State<Arc<AppState>>,
    RequireUser(caller): RequireUser,
    Query(query): Query<SongIdQuery>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    collect(&state, caller.identity.user_id, FavoriteTarget::Song(query.song_id)).await
}

pub async fn cancel_collect_song(
    State(state): State<Arc<AppState>>,
    RequireUser(caller): RequireUser,
    Query(query): Query<SongIdQuery>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    cancel_collect(&state, caller.identity.user_id, FavoriteTarget::Song(query.song_id)).await
}

pub async fn collect_playlist(
    State(state): State<Arc<AppState>>,
    RequireUser(caller): RequireUser,
    Query(query): Query<PlaylistIdQuery>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    collect(
        &state,
        caller.identity.user_id,
        FavoriteTarget::Playlist(query.playlist_id),
    )
    .await
}

pub async fn cancel_collect_playlist(
    State(state): State<Arc<AppState>>,
    RequireUser(caller): RequireUser,
    Query(query): Query<PlaylistIdQuery>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    cancel_collect(
        &state,
        caller.identity.user_id,
        FavoriteTarget::Playlist(query.playlist_id),
    )
    .await
}
