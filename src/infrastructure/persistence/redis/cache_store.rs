//! Redis Cache Store Implementation
//!
//! 通配符删除使用 SCAN MATCH 游标遍历，避免 KEYS 阻塞

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{CacheError, CacheStorePort};

const SCAN_BATCH: usize = 100;

fn backend_error(e: redis::RedisError) -> CacheError {
    CacheError::BackendError(e.to_string())
}

/// Redis 缓存
pub struct RedisCacheStore {
    conn: ConnectionManager,
}

impl RedisCacheStore {
    /// 连接 Redis，ConnectionManager 断线自动重连
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client = redis::Client::open(url).map_err(backend_error)?;
        let conn = ConnectionManager::new(client).await.map_err(backend_error)?;

        tracing::info!(url = %url, "RedisCacheStore connected");
        Ok(Self { conn })
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[async_trait]
impl CacheStorePort for RedisCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(key).await.map_err(backend_error)?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        match ttl {
            // SET EX 最小 1 秒
            Some(ttl) => {
                let secs = ttl.as_secs().max(1);
                let _: () = conn.set_ex(key, value, secs).await.map_err(backend_error)?;
            }
            None => {
                let _: () = conn.set(key, value).await.map_err(backend_error)?;
            }
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.conn.clone();
        let _: u64 = conn.del(key).await.map_err(backend_error)?;
        Ok(())
    }

    async fn delete_by_pattern(&self, pattern: &str) -> Result<u64, CacheError> {
        let mut conn = self.conn.clone();
        let mut cursor: u64 = 0;
        let mut deleted = 0u64;

        loop {
            let (next, keys): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query_async(&mut conn)
                .await
                .map_err(backend_error)?;

            if !keys.is_empty() {
                let removed: u64 = conn.del(&keys).await.map_err(backend_error)?;
                deleted += removed;
            }

            if next == 0 {
                break;
            }
            cursor = next;
        }

        tracing::debug!(pattern = %pattern, deleted = deleted, "Redis keys deleted by pattern");
        Ok(deleted)
    }
}
