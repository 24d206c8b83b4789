//! Banner HTTP Handlers

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::application::ports::BannerView;
use crate::application::ListBanners;
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 启用中的轮播图
pub async fn get_banner_list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<BannerView>>>, ApiError> {
    let banners = state.list_banners_handler.handle(ListBanners).await?;
    Ok(Json(ApiResponse::success(banners)))
}
