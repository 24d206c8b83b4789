//! Artist Queries

use serde::Serialize;

use crate::domain::catalog::Gender;

/// 分页查询歌手
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListArtists {
    pub page_num: u32,
    pub page_size: u32,
    pub artist_name: Option<String>,
    pub gender: Option<Gender>,
    pub area: Option<String>,
}

/// 歌手详情查询
#[derive(Debug, Clone)]
pub struct GetArtistDetail {
    pub artist_id: u64,
}

/// 随机歌手查询
#[derive(Debug, Clone, Default)]
pub struct GetRandomArtists;

/// 管理端全部歌手名
#[derive(Debug, Clone, Default)]
pub struct ListArtistNames;
