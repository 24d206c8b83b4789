//! Banner Commands

use crate::domain::catalog::BannerStatus;

/// 新增轮播图
#[derive(Debug, Clone)]
pub struct AddBanner {
    pub file_name: String,
    pub data: Vec<u8>,
}

/// 替换轮播图图片
#[derive(Debug, Clone)]
pub struct UpdateBanner {
    pub banner_id: u64,
    pub file_name: String,
    pub data: Vec<u8>,
}

/// 启用 / 禁用轮播图
#[derive(Debug, Clone)]
pub struct UpdateBannerStatus {
    pub banner_id: u64,
    pub status: BannerStatus,
}

/// 删除轮播图（单个或批量）
#[derive(Debug, Clone)]
pub struct DeleteBanners {
    pub banner_ids: Vec<u64>,
}
