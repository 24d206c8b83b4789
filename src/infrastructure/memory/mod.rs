//! Memory Layer - In-Memory State
//!
//! 进程内缓存实现（单实例部署与测试使用）

mod cache_store;

pub use cache_store::InMemoryCacheStore;
