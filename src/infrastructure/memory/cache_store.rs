//! In-Memory Cache Store Implementation
//!
//! 进程内缓存。过期条目在读到时删除，
//! 另外每写入 `sweep_every` 次整表清理一次，未被读到的过期条目也会被回收

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use wildmatch::WildMatch;

use crate::application::ports::{CacheError, CacheStorePort};

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// 默认每写入多少次整表清理一次过期条目
const DEFAULT_SWEEP_EVERY: u64 = 1024;

/// 内存缓存
pub struct InMemoryCacheStore {
    entries: DashMap<String, Entry>,
    writes: AtomicU64,
    sweep_every: u64,
}

impl InMemoryCacheStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            writes: AtomicU64::new(0),
            sweep_every: DEFAULT_SWEEP_EVERY,
        }
    }

    /// 调整写入触发清理的间隔（至少 1）
    pub fn with_sweep_every(mut self, writes: u64) -> Self {
        self.sweep_every = writes.max(1);
        self
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 当前条目数（含未清理的过期条目）
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn sweep(&self) -> u64 {
        let now = Instant::now();
        let mut purged = 0u64;
        self.entries.retain(|_, entry| {
            if entry.is_expired(now) {
                purged += 1;
                false
            } else {
                true
            }
        });
        purged
    }
}

impl Default for InMemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStorePort for InMemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove_if(key, |_, entry| entry.is_expired(now));
            tracing::debug!(key = %key, "Expired cache entry evicted");
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<(), CacheError> {
        let expires_at = ttl.map(|ttl| Instant::now() + ttl);
        self.entries
            .insert(key.to_string(), Entry { value, expires_at });

        let writes = self.writes.fetch_add(1, Ordering::Relaxed) + 1;
        if writes % self.sweep_every == 0 {
            let purged = self.sweep();
            if purged > 0 {
                tracing::debug!(purged = purged, "Expired cache entries swept on write");
            }
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.remove(key);
        Ok(())
    }

    async fn delete_by_pattern(&self, pattern: &str) -> Result<u64, CacheError> {
        let matcher = WildMatch::new(pattern);
        let mut deleted = 0u64;

        self.entries.retain(|key, _| {
            if matcher.matches(key) {
                deleted += 1;
                false
            } else {
                true
            }
        });

        Ok(deleted)
    }

    async fn purge_expired(&self) -> Result<u64, CacheError> {
        Ok(self.sweep())
    }
}
