//! Artist Commands

use chrono::NaiveDate;

use crate::domain::catalog::Gender;

/// 新增歌手
#[derive(Debug, Clone)]
pub struct AddArtist {
    pub artist_name: String,
    pub gender: Gender,
    pub birth: Option<NaiveDate>,
    pub area: String,
    pub introduction: String,
}

/// 更新歌手
#[derive(Debug, Clone)]
pub struct UpdateArtist {
    pub artist_id: u64,
    pub artist_name: String,
    pub gender: Gender,
    pub birth: Option<NaiveDate>,
    pub area: String,
    pub introduction: String,
}

/// 更新歌手头像
#[derive(Debug, Clone)]
pub struct UpdateArtistAvatar {
    pub artist_id: u64,
    pub file_name: String,
    pub data: Vec<u8>,
}

/// 删除歌手（单个或批量）
#[derive(Debug, Clone)]
pub struct DeleteArtists {
    pub artist_ids: Vec<u64>,
}
