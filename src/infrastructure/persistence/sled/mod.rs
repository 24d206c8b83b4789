//! Sled Persistence - 嵌入式缓存存储

mod cache_store;

pub use cache_store::{SledCacheConfig, SledCacheStats, SledCacheStore};
