//! Favorite Commands

use crate::domain::catalog::FavoriteTarget;

/// 收藏歌曲或歌单
#[derive(Debug, Clone)]
pub struct Collect {
    pub user_id: u64,
    pub target: FavoriteTarget,
}

/// 取消收藏
#[derive(Debug, Clone)]
pub struct CancelCollect {
    pub user_id: u64,
    pub target: FavoriteTarget,
}
