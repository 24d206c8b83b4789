//! Cache Store Port - 键值缓存
//!
//! 字符串 key -> JSON 字符串，单 key TTL，支持通配符批量删除。
//! 实现: 内存 (DashMap)、Sled、Redis

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Cache 错误
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache backend error: {0}")]
    BackendError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Cache operation timed out after {0:?}")]
    Timeout(Duration),
}

/// Cache Store Port
///
/// 缓存只是派生副本，调用方将任何错误视为未命中
#[async_trait]
pub trait CacheStorePort: Send + Sync {
    /// 读取，过期或不存在返回 None
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// 写入（覆盖），ttl 为 None 表示不过期
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<(), CacheError>;

    /// 删除，key 不存在时也返回 Ok
    async fn delete(&self, key: &str) -> Result<(), CacheError>;

    /// 按通配符删除（`*` 任意长度，`?` 单字符），返回删除数量
    ///
    /// 与并发写入交错时至少删除调用开始时已存在的匹配 key
    async fn delete_by_pattern(&self, pattern: &str) -> Result<u64, CacheError>;

    /// 清理已过期但尚未被读到的条目，返回清理数量
    ///
    /// 自带过期机制的后端（Redis）保持默认实现
    async fn purge_expired(&self) -> Result<u64, CacheError> {
        Ok(0)
    }
}

/// 通配符中第一个元字符之前的字面前缀
///
/// 用于缩小前缀扫描范围，如 `song:*` -> `song:`
pub fn glob_literal_prefix(pattern: &str) -> &str {
    match pattern.find(['*', '?', '[']) {
        Some(idx) => &pattern[..idx],
        None => pattern,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glob_literal_prefix() {
        assert_eq!(glob_literal_prefix("song:*"), "song:");
        assert_eq!(glob_literal_prefix("favorite:get?x*"), "favorite:get");
        assert_eq!(glob_literal_prefix("*"), "");
        assert_eq!(glob_literal_prefix("plain"), "plain");
    }
}
