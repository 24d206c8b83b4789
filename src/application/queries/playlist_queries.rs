//! Playlist Queries

use serde::Serialize;

/// 分页查询歌单
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPlaylists {
    pub page_num: u32,
    pub page_size: u32,
    pub title: Option<String>,
    pub style: Option<String>,
}

/// 歌单详情查询
#[derive(Debug, Clone)]
pub struct GetPlaylistDetail {
    pub playlist_id: u64,
}

/// 推荐歌单查询
#[derive(Debug, Clone, Default)]
pub struct GetRecommendedPlaylists;

/// 管理端分页查询歌单完整信息
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPlaylistRecords {
    pub page_num: u32,
    pub page_size: u32,
    pub title: Option<String>,
    pub style: Option<String>,
}
