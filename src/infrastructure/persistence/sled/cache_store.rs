//! Sled-based Cache Store Implementation
//!
//! 条目以 bincode 编码 `{value, expires_at}`，过期时间为毫秒时间戳。
//! 通配符删除先按字面前缀 scan_prefix，再逐个 wildmatch。
//! 过期条目读到时删除，每写入 `sweep_every` 次全表扫描清理一次

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sled::Db;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use wildmatch::WildMatch;

use crate::application::ports::{glob_literal_prefix, CacheError, CacheStorePort};

/// Sled 缓存配置
#[derive(Debug, Clone)]
pub struct SledCacheConfig {
    /// 数据库路径
    pub db_path: String,
    /// 每写入多少次全表清理一次过期条目
    pub sweep_every: u64,
}

impl Default for SledCacheConfig {
    fn default() -> Self {
        Self {
            db_path: "data/cache.sled".to_string(),
            sweep_every: 1024,
        }
    }
}

/// 内部缓存条目
#[derive(Debug, Clone, Serialize, Deserialize)]
struct InternalCacheEntry {
    value: String,
    expires_at: Option<i64>,
}

impl InternalCacheEntry {
    fn is_expired(&self, now_ms: i64) -> bool {
        self.expires_at.is_some_and(|at| at <= now_ms)
    }
}

/// 缓存命中统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SledCacheStats {
    pub total_entries: usize,
    pub hit_count: u64,
    pub miss_count: u64,
}

/// Sled 缓存
pub struct SledCacheStore {
    db: Db,
    hit_count: AtomicU64,
    miss_count: AtomicU64,
    writes: AtomicU64,
    sweep_every: u64,
}

impl SledCacheStore {
    /// 创建新的缓存实例
    pub fn new(config: &SledCacheConfig) -> Result<Self, CacheError> {
        let db = sled::open(&config.db_path)
            .map_err(|e| CacheError::BackendError(e.to_string()))?;

        tracing::info!(
            db_path = %config.db_path,
            entries = db.len(),
            "SledCacheStore initialized"
        );

        Ok(Self {
            db,
            hit_count: AtomicU64::new(0),
            miss_count: AtomicU64::new(0),
            writes: AtomicU64::new(0),
            sweep_every: config.sweep_every.max(1),
        })
    }

    /// 打开现有缓存
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CacheError> {
        let config = SledCacheConfig {
            db_path: path.as_ref().to_string_lossy().to_string(),
            ..SledCacheConfig::default()
        };
        Self::new(&config)
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 刷新数据库
    pub fn flush(&self) -> Result<(), CacheError> {
        self.db
            .flush()
            .map_err(|e| CacheError::BackendError(e.to_string()))?;
        Ok(())
    }

    pub fn stats(&self) -> SledCacheStats {
        SledCacheStats {
            total_entries: self.db.len(),
            hit_count: self.hit_count.load(Ordering::Relaxed),
            miss_count: self.miss_count.load(Ordering::Relaxed),
        }
    }

    /// 全表扫描，删除已过期条目
    fn sweep(&self) -> Result<u64, CacheError> {
        let now_ms = Utc::now().timestamp_millis();
        let mut purged = 0u64;

        for item in self.db.iter() {
            let (key, data) = item.map_err(|e| CacheError::BackendError(e.to_string()))?;
            let Ok(entry) = bincode::deserialize::<InternalCacheEntry>(&data) else {
                continue;
            };
            if !entry.is_expired(now_ms) {
                continue;
            }
            let swapped = self
                .db
                .compare_and_swap(&key, Some(data), None as Option<&[u8]>)
                .map_err(|e| CacheError::BackendError(e.to_string()))?;
            if swapped.is_ok() {
                purged += 1;
            }
        }

        Ok(purged)
    }

    fn miss(&self) -> Result<Option<String>, CacheError> {
        self.miss_count.fetch_add(1, Ordering::Relaxed);
        Ok(None)
    }
}

#[async_trait]
impl CacheStorePort for SledCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let data = match self
            .db
            .get(key)
            .map_err(|e| CacheError::BackendError(e.to_string()))?
        {
            Some(data) => data,
            None => return self.miss(),
        };

        let entry: InternalCacheEntry = bincode::deserialize(&data)
            .map_err(|e| CacheError::SerializationError(e.to_string()))?;

        if entry.is_expired(Utc::now().timestamp_millis()) {
            // 只删除仍是这份数据的条目，避免覆盖并发写入
            let _ = self.db.compare_and_swap(key, Some(data), None as Option<&[u8]>);
            tracing::debug!(key = %key, "Expired cache entry evicted");
            return self.miss();
        }

        self.hit_count.fetch_add(1, Ordering::Relaxed);
        Ok(Some(entry.value))
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<(), CacheError> {
        let expires_at = ttl.map(|ttl| Utc::now().timestamp_millis() + ttl.as_millis() as i64);
        let entry = InternalCacheEntry { value, expires_at };

        let entry_bytes =
            bincode::serialize(&entry).map_err(|e| CacheError::SerializationError(e.to_string()))?;

        self.db
            .insert(key, entry_bytes)
            .map_err(|e| CacheError::BackendError(e.to_string()))?;

        let writes = self.writes.fetch_add(1, Ordering::Relaxed) + 1;
        if writes % self.sweep_every == 0 {
            let purged = self.sweep()?;
            if purged > 0 {
                tracing::debug!(purged = purged, "Expired cache entries swept on write");
            }
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.db
            .remove(key)
            .map_err(|e| CacheError::BackendError(e.to_string()))?;
        Ok(())
    }

    async fn delete_by_pattern(&self, pattern: &str) -> Result<u64, CacheError> {
        let matcher = WildMatch::new(pattern);
        let mut deleted = 0u64;

        for item in self.db.scan_prefix(glob_literal_prefix(pattern)) {
            let (key, _) = item.map_err(|e| CacheError::BackendError(e.to_string()))?;
            let Ok(key_str) = std::str::from_utf8(&key) else {
                continue;
            };
            if !matcher.matches(key_str) {
                continue;
            }
            if self
                .db
                .remove(&key)
                .map_err(|e| CacheError::BackendError(e.to_string()))?
                .is_some()
            {
                deleted += 1;
            }
        }

        Ok(deleted)
    }

    async fn purge_expired(&self) -> Result<u64, CacheError> {
        self.sweep()
    }
}
