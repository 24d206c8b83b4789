//! Comment HTTP Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::application::{DeleteComment, LikeComment};
use crate::infrastructure::http::dto::{
    ApiResponse, CreatedResponse, PlaylistCommentRequest, SongCommentRequest,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::RequireUser;
use crate::infrastructure::http::state::AppState;

/// 评论歌曲
pub async fn add_song_comment(
    State(state): State<Arc<AppState>>,
    RequireUser(caller): RequireUser,
    Json(req): Json<SongCommentRequest>,
) -> Result<Json<ApiResponse<CreatedResponse>>, ApiError> {
    let id = state
        .add_comment_handler
        .handle(req.into_command(caller.identity.user_id))
        .await?;
    Ok(Json(ApiResponse::success(CreatedResponse { id })))
}

/// 评论歌单
pub async fn add_playlist_comment(
    State(state): State<Arc<AppState>>,
    RequireUser(caller): RequireUser,
    Json(req): Json<PlaylistCommentRequest>,
) -> Result<Json<ApiResponse<CreatedResponse>>, ApiError> {
    let id = state
        .add_comment_handler
        .handle(req.into_command(caller.identity.user_id))
        .await?;
    Ok(Json(ApiResponse::success(CreatedResponse { id })))
}

/// 删除自己的评论
pub async fn delete_comment(
    State(state): State<Arc<AppState>>,
    RequireUser(caller): RequireUser,
    Path(comment_id): Path<u64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .delete_comment_handler
        .handle(DeleteComment {
            user_id: caller.identity.user_id,
            comment_id,
        })
        .await?;
    Ok(Json(ApiResponse::ok("删除成功")))
}

/// 点赞评论（无需登录）
pub async fn like_comment(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<u64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .like_comment_handler
        .handle(LikeComment {
            comment_id,
            liked: true,
        })
        .await?;
    Ok(Json(ApiResponse::ok("点赞成功")))
}

pub async fn cancel_like_comment(
    State(state): State<Arc<AppState>>,
    Path(comment_id): Path<u64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .like_comment_handler
        .handle(LikeComment {
            comment_id,
            liked: false,
        })
        .await?;
    Ok(Json(ApiResponse::ok("已取消点赞")))
}
