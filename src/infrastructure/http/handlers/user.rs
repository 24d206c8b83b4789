//! User HTTP Handlers

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

use super::upload::read_upload;
use crate::application::ports::UserInfoView;
use crate::application::{DeleteAccount, GetUserInfo, Logout, UpdateUserAvatar};
use crate::infrastructure::http::dto::{ApiResponse, UpdateUserInfoRequest, UploadResponse};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::extract::RequireUser;
use crate::infrastructure::http::state::AppState;

/// 登出：吊销令牌
pub async fn logout(
    State(state): State<Arc<AppState>>,
    RequireUser(caller): RequireUser,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .logout_handler
        .handle(Logout {
            token: caller.token,
        })
        .await?;
    Ok(Json(ApiResponse::ok("登出成功")))
}

/// 注销账号
pub async fn delete_account(
    State(state): State<Arc<AppState>>,
    RequireUser(caller): RequireUser,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .delete_account_handler
        .handle(DeleteAccount {
            user_id: caller.identity.user_id,
            token: caller.token,
        })
        .await?;
    Ok(Json(ApiResponse::ok("账号已注销")))
}

/// 当前用户资料
pub async fn get_user_info(
    State(state): State<Arc<AppState>>,
    RequireUser(caller): RequireUser,
) -> Result<Json<ApiResponse<UserInfoView>>, ApiError> {
    let info = state
        .get_user_info_handler
        .handle(GetUserInfo {
            user_id: caller.identity.user_id,
        })
        .await?;
    Ok(Json(ApiResponse::success(info)))
}

pub async fn update_user_info(
    State(state): State<Arc<AppState>>,
    RequireUser(caller): RequireUser,
    Json(req): Json<UpdateUserInfoRequest>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state
        .update_user_info_handler
        .handle(req.into_command(caller.identity.user_id))
        .await?;
    Ok(Json(ApiResponse::ok("更新成功")))
}

/// 上传新头像，旧头像随后删除
pub async fn update_user_avatar(
    State(state): State<Arc<AppState>>,
    RequireUser(caller): RequireUser,
    multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResponse>>, ApiError> {
    let upload = read_upload(multipart).await?;
    let url = state
        .update_user_avatar_handler
        .handle(UpdateUserAvatar {
            user_id: caller.identity.user_id,
            file_name: upload.file_name,
            data: upload.data,
        })
        .await?;
    Ok(Json(ApiResponse::success(UploadResponse { url })))
}
