//! 缓存失效域
//!
//! 每个读接口的 key 以 `{domain}:` 开头，写操作整域删除 `{domain}:*`

use std::fmt;

/// 缓存域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheDomain {
    Song,
    Playlist,
    Artist,
    Favorite,
    User,
    Banner,
}

impl CacheDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheDomain::Song => "song",
            CacheDomain::Playlist => "playlist",
            CacheDomain::Artist => "artist",
            CacheDomain::Favorite => "favorite",
            CacheDomain::User => "user",
            CacheDomain::Banner => "banner",
        }
    }

    /// 读接口 key 前缀，如 `song:getAllSongs`
    pub fn operation(&self, name: &str) -> String {
        format!("{}:{}", self.as_str(), name)
    }

    /// 整域删除用的通配符
    pub fn pattern(&self) -> String {
        format!("{}:*", self.as_str())
    }
}

impl fmt::Display for CacheDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 登出、注销账号时需要清理的域
pub const ACCOUNT_DOMAINS: &[CacheDomain] = &[
    CacheDomain::User,
    CacheDomain::Playlist,
    CacheDomain::Song,
    CacheDomain::Favorite,
    CacheDomain::Artist,
];

/// 收藏/取消收藏歌曲
pub const SONG_FAVORITE_DOMAINS: &[CacheDomain] = &[CacheDomain::Favorite, CacheDomain::Song];

/// 收藏/取消收藏歌单
pub const PLAYLIST_FAVORITE_DOMAINS: &[CacheDomain] =
    &[CacheDomain::Favorite, CacheDomain::Playlist];

/// 歌曲增删改：歌手详情、歌单详情与收藏列表都内嵌歌曲
pub const SONG_WRITE_DOMAINS: &[CacheDomain] = &[
    CacheDomain::Song,
    CacheDomain::Artist,
    CacheDomain::Playlist,
    CacheDomain::Favorite,
];

/// 歌手改名、换头像、删除：歌曲视图内嵌歌手名
pub const ARTIST_WRITE_DOMAINS: &[CacheDomain] = &[
    CacheDomain::Artist,
    CacheDomain::Song,
    CacheDomain::Playlist,
    CacheDomain::Favorite,
];

/// 歌单修改、换封面、删除：收藏歌单列表内嵌歌单
pub const PLAYLIST_WRITE_DOMAINS: &[CacheDomain] =
    &[CacheDomain::Playlist, CacheDomain::Favorite];

/// 修改个人资料、头像：评论内嵌用户名与头像
pub const PROFILE_DOMAINS: &[CacheDomain] =
    &[CacheDomain::User, CacheDomain::Song, CacheDomain::Playlist];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_prefix_matches_pattern() {
        let key = CacheDomain::Song.operation("getAllSongs");
        assert_eq!(key, "song:getAllSongs");
        assert!(wildmatch::WildMatch::new(&CacheDomain::Song.pattern()).matches(&key));
        assert!(!wildmatch::WildMatch::new(&CacheDomain::Playlist.pattern()).matches(&key));
    }

    #[test]
    fn test_account_domains_cover_personalized_reads() {
        for domain in [
            CacheDomain::User,
            CacheDomain::Playlist,
            CacheDomain::Song,
            CacheDomain::Favorite,
            CacheDomain::Artist,
        ] {
            assert!(ACCOUNT_DOMAINS.contains(&domain));
        }
        assert!(!ACCOUNT_DOMAINS.contains(&CacheDomain::Banner));
    }

    #[test]
    fn test_song_writes_reach_embedding_reads() {
        for domain in [
            CacheDomain::Song,
            CacheDomain::Favorite,
            CacheDomain::Playlist,
            CacheDomain::Artist,
        ] {
            assert!(SONG_WRITE_DOMAINS.contains(&domain));
        }
        assert!(!SONG_WRITE_DOMAINS.contains(&CacheDomain::Banner));
    }

    #[test]
    fn test_artist_writes_reach_song_views() {
        assert!(ARTIST_WRITE_DOMAINS.contains(&CacheDomain::Artist));
        assert!(ARTIST_WRITE_DOMAINS.contains(&CacheDomain::Song));
        assert!(ARTIST_WRITE_DOMAINS.contains(&CacheDomain::Favorite));
        assert!(PLAYLIST_WRITE_DOMAINS.contains(&CacheDomain::Favorite));
        assert!(!PLAYLIST_WRITE_DOMAINS.contains(&CacheDomain::Song));
    }

    #[test]
    fn test_profile_writes_reach_comment_views() {
        assert!(PROFILE_DOMAINS.contains(&CacheDomain::User));
        assert!(PROFILE_DOMAINS.contains(&CacheDomain::Song));
        assert!(PROFILE_DOMAINS.contains(&CacheDomain::Playlist));
    }
}
