//! Song Commands

use chrono::NaiveDate;

/// 新增歌曲
#[derive(Debug, Clone)]
pub struct AddSong {
    pub artist_id: u64,
    pub song_name: String,
    pub album: String,
    pub style: String,
    pub release_time: Option<NaiveDate>,
}

/// 更新歌曲信息
#[derive(Debug, Clone)]
pub struct UpdateSong {
    pub song_id: u64,
    pub artist_id: u64,
    pub song_name: String,
    pub album: String,
    pub lyric: Option<String>,
    pub style: String,
    pub release_time: Option<NaiveDate>,
}

/// 更新歌曲封面
#[derive(Debug, Clone)]
pub struct UpdateSongCover {
    pub song_id: u64,
    pub file_name: String,
    pub data: Vec<u8>,
}

/// 更新歌曲音频
#[derive(Debug, Clone)]
pub struct UpdateSongAudio {
    pub song_id: u64,
    pub file_name: String,
    pub data: Vec<u8>,
    pub duration: String,
}

/// 删除歌曲（单个或批量）
#[derive(Debug, Clone)]
pub struct DeleteSongs {
    pub song_ids: Vec<u64>,
}
