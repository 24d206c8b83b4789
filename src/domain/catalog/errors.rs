//! Catalog Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("无效的分页参数: {0}")]
    InvalidPagination(String),

    #[error("无效的名称: {0}")]
    InvalidName(String),

    #[error("无效的性别: {0}")]
    InvalidGender(u8),

    #[error("轮播图状态无效: {0}")]
    InvalidBannerStatus(u8),
}
