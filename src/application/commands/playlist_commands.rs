//! Playlist Commands

/// 新增歌单
#[derive(Debug, Clone)]
pub struct AddPlaylist {
    pub title: String,
    pub introduction: String,
    pub style: String,
}

/// 更新歌单
#[derive(Debug, Clone)]
pub struct UpdatePlaylist {
    pub playlist_id: u64,
    pub title: String,
    pub introduction: String,
    pub style: String,
}

/// 更新歌单封面
#[derive(Debug, Clone)]
pub struct UpdatePlaylistCover {
    pub playlist_id: u64,
    pub file_name: String,
    pub data: Vec<u8>,
}

/// 绑定歌曲到歌单
#[derive(Debug, Clone)]
pub struct BindPlaylistSongs {
    pub playlist_id: u64,
    pub song_ids: Vec<u64>,
}

/// 删除歌单（单个或批量）
#[derive(Debug, Clone)]
pub struct DeletePlaylists {
    pub playlist_ids: Vec<u64>,
}
