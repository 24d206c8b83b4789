//! 查询缓存层
//!
//! - key: 确定性 key 构造
//! - domain: 失效域与跨域失效策略
//! - query_cache: Read-Through 包装与按域失效

mod domain;
mod key;
mod query_cache;

pub use domain::{
    CacheDomain, ACCOUNT_DOMAINS, ARTIST_WRITE_DOMAINS, PLAYLIST_FAVORITE_DOMAINS,
    PLAYLIST_WRITE_DOMAINS, PROFILE_DOMAINS, SONG_FAVORITE_DOMAINS, SONG_WRITE_DOMAINS,
};
pub use key::{CacheKey, KeyArg};
pub use query_cache::{CacheSettings, QueryCache};
