//! Favorite Queries
//!
//! 收藏列表按用户缓存，user_id 是 key 的一部分

use serde::Serialize;

/// 用户收藏的歌曲
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFavoriteSongs {
    pub user_id: u64,
    pub page_num: u32,
    pub page_size: u32,
    pub song_name: Option<String>,
    pub artist_name: Option<String>,
    pub album: Option<String>,
}

/// 用户收藏的歌单
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFavoritePlaylists {
    pub user_id: u64,
    pub page_num: u32,
    pub page_size: u32,
    pub title: Option<String>,
    pub style: Option<String>,
}
