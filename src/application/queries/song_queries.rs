//! Song Queries

use serde::Serialize;

/// 分页查询歌曲（缓存 key 由字段派生）
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSongs {
    pub page_num: u32,
    pub page_size: u32,
    pub song_name: Option<String>,
    pub artist_name: Option<String>,
    pub album: Option<String>,
}

/// 歌曲详情查询
#[derive(Debug, Clone)]
pub struct GetSongDetail {
    pub song_id: u64,
}

/// 推荐歌曲查询
#[derive(Debug, Clone, Default)]
pub struct GetRecommendedSongs;

/// 管理端按歌手分页查询歌曲
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSongsByArtist {
    pub page_num: u32,
    pub page_size: u32,
    pub artist_id: Option<u64>,
    pub song_name: Option<String>,
    pub album: Option<String>,
}
