//! Banner Queries

use serde::Serialize;

use crate::domain::catalog::BannerStatus;

/// 启用中的轮播图
#[derive(Debug, Clone, Default)]
pub struct ListBanners;

/// 管理端分页查询轮播图
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListAllBanners {
    pub page_num: u32,
    pub page_size: u32,
    pub status: Option<BannerStatus>,
}
