//! 管理端统计查询（不缓存）

use crate::domain::catalog::Gender;

/// 歌曲总数，style 模糊匹配
#[derive(Debug, Clone, Default)]
pub struct CountSongs {
    pub style: Option<String>,
}

/// 歌手总数
#[derive(Debug, Clone, Default)]
pub struct CountArtists {
    pub gender: Option<Gender>,
    pub area: Option<String>,
}

/// 歌单总数，style 精确匹配
#[derive(Debug, Clone, Default)]
pub struct CountPlaylists {
    pub style: Option<String>,
}

/// 用户总数
#[derive(Debug, Clone, Default)]
pub struct CountUsers;
