//! Redis Persistence - 分布式缓存存储（cache-redis feature）

mod cache_store;

pub use cache_store::RedisCacheStore;
