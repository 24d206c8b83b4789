//! Persistence Layer - 数据持久化
//!
//! SQLite 记录存储，Sled / Redis 查询缓存

#[cfg(feature = "cache-redis")]
pub mod redis;
pub mod sled;
pub mod sqlite;

#[cfg(feature = "cache-redis")]
pub use self::redis::RedisCacheStore;
pub use self::sled::{SledCacheConfig, SledCacheStore};
