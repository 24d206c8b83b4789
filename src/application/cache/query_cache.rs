//! Read-Through 查询缓存
//!
//! - 所有缓存调用带超时，失败降级为未命中 / 空操作，只记录日志
//! - 回源成功才写缓存，回源失败（包括未找到）原样返回错误
//! - 写操作按域整体失效
//! - 后台任务按固定间隔清理过期条目

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use super::domain::CacheDomain;
use super::key::CacheKey;
use crate::application::ports::{CacheError, CacheStorePort};

/// 缓存参数
#[derive(Debug, Clone, Copy)]
pub struct CacheSettings {
    /// 查询结果默认 TTL
    pub default_ttl: Duration,
    /// 单次缓存操作超时
    pub op_timeout: Duration,
    /// 过期条目清理间隔
    pub purge_interval: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            default_ttl: Duration::from_secs(3600),
            op_timeout: Duration::from_secs(3),
            purge_interval: Duration::from_secs(300),
        }
    }
}

/// 查询缓存
pub struct QueryCache {
    store: Arc<dyn CacheStorePort>,
    settings: CacheSettings,
}

impl QueryCache {
    pub fn new(store: Arc<dyn CacheStorePort>, settings: CacheSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> CacheSettings {
        self.settings
    }

    /// 读取并反序列化，任何失败都视为未命中
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.bounded("get", key, self.store.get(key)).await??;

        match serde_json::from_str::<T>(&raw) {
            Ok(value) => {
                tracing::debug!(key = %key, "Cache hit");
                Some(value)
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cached value is not decodable, treating as miss");
                None
            }
        }
    }

    /// 以默认 TTL 写入
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) {
        self.set_with_ttl(key, value, Some(self.settings.default_ttl))
            .await;
    }

    /// 以指定 TTL 写入，失败只记录日志
    pub async fn set_with_ttl<T: Serialize>(&self, key: &str, value: &T, ttl: Option<Duration>) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Failed to encode cache value");
                return;
            }
        };

        if self
            .bounded("set", key, self.store.set(key, raw, ttl))
            .await
            .is_some()
        {
            tracing::debug!(key = %key, ttl = ?ttl, "Cache populated");
        }
    }

    /// 删除单个 key
    pub async fn delete(&self, key: &str) {
        self.bounded("delete", key, self.store.delete(key)).await;
    }

    /// Read-Through：命中直接返回，否则回源并写入缓存
    pub async fn read_through<T, E, F, Fut>(&self, key: &CacheKey, compute: F) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(cached) = self.get::<T>(key.as_str()).await {
            return Ok(cached);
        }

        tracing::debug!(key = %key, "Cache miss, loading from source");
        let fresh = compute().await?;
        self.set(key.as_str(), &fresh).await;
        Ok(fresh)
    }

    /// 以查询结构体派生 key 的 Read-Through，key 无法生成时直接回源
    pub async fn read_through_query<Q, T, E, F, Fut>(
        &self,
        prefix: &str,
        query: &Q,
        compute: F,
    ) -> Result<T, E>
    where
        Q: Serialize,
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match CacheKey::for_query(prefix, query) {
            Ok(key) => self.read_through(&key, compute).await,
            Err(e) => {
                tracing::warn!(prefix = %prefix, error = %e, "Failed to derive cache key, bypassing cache");
                compute().await
            }
        }
    }

    /// 整域失效，返回删除数量（失败为 0）
    pub async fn invalidate(&self, domain: CacheDomain) -> u64 {
        let pattern = domain.pattern();
        let deleted = self
            .bounded(
                "delete_by_pattern",
                &pattern,
                self.store.delete_by_pattern(&pattern),
            )
            .await
            .unwrap_or(0);

        tracing::debug!(domain = %domain, deleted = deleted, "Cache domain invalidated");
        deleted
    }

    /// 多域失效
    pub async fn invalidate_all(&self, domains: &[CacheDomain]) {
        for domain in domains {
            self.invalidate(*domain).await;
        }
    }

    /// 清理过期条目，返回清理数量（失败为 0）
    pub async fn purge_expired(&self) -> u64 {
        let purged = self
            .bounded("purge_expired", "*", self.store.purge_expired())
            .await
            .unwrap_or(0);
        if purged > 0 {
            tracing::debug!(purged = purged, "Expired cache entries purged");
        }
        purged
    }

    /// 启动后台清理任务，随运行时退出
    pub fn spawn_expiry_sweep(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let cache = Arc::clone(self);
        let every = self.settings.purge_interval;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // 第一次 tick 立即返回
            ticker.tick().await;
            loop {
                ticker.tick().await;
                cache.purge_expired().await;
            }
        })
    }

    /// 超时 + 错误吸收
    async fn bounded<T>(
        &self,
        op: &'static str,
        key: &str,
        fut: impl Future<Output = Result<T, CacheError>>,
    ) -> Option<T> {
        match tokio::time::timeout(self.settings.op_timeout, fut).await {
            Ok(Ok(value)) => Some(value),
            Ok(Err(e)) => {
                tracing::warn!(op = op, key = %key, error = %e, "Cache operation failed");
                None
            }
            Err(_) => {
                let e = CacheError::Timeout(self.settings.op_timeout);
                tracing::warn!(op = op, key = %key, error = %e, "Cache operation failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryCacheStore;
    use async_trait::async_trait;
    use serde::Deserialize;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Payload {
        total: u64,
        names: Vec<String>,
    }

    fn payload() -> Payload {
        Payload {
            total: 2,
            names: vec!["a".to_string(), "b".to_string()],
        }
    }

    fn cache() -> QueryCache {
        QueryCache::new(Arc::new(InMemoryCacheStore::new()), CacheSettings::default())
    }

    #[tokio::test]
    async fn test_read_through_computes_at_most_once() {
        let cache = cache();
        let key = CacheKey::build("song:getAllSongs", &[&1u32, &None::<&str>]);
        let calls = AtomicUsize::new(0);
        let counter = &calls;

        let first = cache
            .read_through(&key, move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(payload())
            })
            .await
            .unwrap();
        let second = cache
            .read_through(&key, move || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>(payload())
            })
            .await
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_compute_is_not_cached() {
        let cache = cache();
        let key = CacheKey::build("song:getSongDetail", &[&9u64]);

        let result: Result<Payload, String> = cache
            .read_through(&key, || async { Err("not found".to_string()) })
            .await;
        assert!(result.is_err());
        assert!(cache.get::<Payload>(key.as_str()).await.is_none());
    }

    #[tokio::test]
    async fn test_invalidate_domain_removes_only_that_domain() {
        let cache = cache();
        cache.set("song:getAllSongs:1-", &payload()).await;
        cache.set("song:getSongDetail:2", &payload()).await;
        cache.set("playlist:getAllPlaylists:1-", &payload()).await;

        let deleted = cache.invalidate(CacheDomain::Song).await;
        assert_eq!(deleted, 2);
        assert!(cache.get::<Payload>("song:getAllSongs:1-").await.is_none());
        assert!(cache.get::<Payload>("song:getSongDetail:2").await.is_none());
        assert!(cache
            .get::<Payload>("playlist:getAllPlaylists:1-")
            .await
            .is_some());
    }

    #[tokio::test]
    async fn test_undecodable_value_is_a_miss() {
        let store = Arc::new(InMemoryCacheStore::new());
        store
            .set("song:getSongDetail:1", "not json".to_string(), None)
            .await
            .unwrap();
        let cache = QueryCache::new(store, CacheSettings::default());

        let value = cache
            .read_through(&CacheKey::build("song:getSongDetail", &[&1u64]), || async {
                Ok::<_, String>(payload())
            })
            .await
            .unwrap();
        assert_eq!(value, payload());
    }

    /// 永远失败的缓存
    struct BrokenStore;

    #[async_trait]
    impl CacheStorePort for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
            Err(CacheError::BackendError("connection refused".to_string()))
        }

        async fn set(&self, _key: &str, _value: String, _ttl: Option<Duration>) -> Result<(), CacheError> {
            Err(CacheError::BackendError("connection refused".to_string()))
        }

        async fn delete(&self, _key: &str) -> Result<(), CacheError> {
            Err(CacheError::BackendError("connection refused".to_string()))
        }

        async fn delete_by_pattern(&self, _pattern: &str) -> Result<u64, CacheError> {
            Err(CacheError::BackendError("connection refused".to_string()))
        }

        async fn purge_expired(&self) -> Result<u64, CacheError> {
            Err(CacheError::BackendError("connection refused".to_string()))
        }
    }

    /// 永远挂起的缓存
    struct HangingStore;

    #[async_trait]
    impl CacheStorePort for HangingStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
            std::future::pending().await
        }

        async fn set(&self, _key: &str, _value: String, _ttl: Option<Duration>) -> Result<(), CacheError> {
            std::future::pending().await
        }

        async fn delete(&self, _key: &str) -> Result<(), CacheError> {
            std::future::pending().await
        }

        async fn delete_by_pattern(&self, _pattern: &str) -> Result<u64, CacheError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_broken_store_degrades_to_source() {
        let cache = QueryCache::new(Arc::new(BrokenStore), CacheSettings::default());
        let key = CacheKey::build("artist:getArtistDetail", &[&1u64]);

        let value = cache
            .read_through(&key, || async { Ok::<_, String>(payload()) })
            .await
            .unwrap();
        assert_eq!(value, payload());
        assert_eq!(cache.invalidate(CacheDomain::Artist).await, 0);
    }

    #[tokio::test]
    async fn test_hanging_store_times_out() {
        let settings = CacheSettings {
            default_ttl: Duration::from_secs(60),
            op_timeout: Duration::from_millis(50),
            ..CacheSettings::default()
        };
        let cache = QueryCache::new(Arc::new(HangingStore), settings);
        let key = CacheKey::build("song:getAllSongs", &[&1u32]);

        let value = cache
            .read_through(&key, || async { Ok::<_, String>(payload()) })
            .await
            .unwrap();
        assert_eq!(value, payload());
    }

    #[tokio::test]
    async fn test_expiry_sweep_reclaims_unread_entries() {
        let store = Arc::new(InMemoryCacheStore::new());
        let settings = CacheSettings {
            purge_interval: Duration::from_millis(100),
            ..CacheSettings::default()
        };
        let cache = Arc::new(QueryCache::new(store.clone(), settings));
        cache
            .set_with_ttl("song:getSongDetail:9", &payload(), Some(Duration::from_millis(50)))
            .await;
        cache.set_with_ttl("song:getSongDetail:10", &payload(), None).await;
        assert_eq!(store.len(), 2);

        let sweeper = cache.spawn_expiry_sweep();
        tokio::time::sleep(Duration::from_millis(400)).await;
        sweeper.abort();

        // 过期 key 从未被读取，也已被回收
        assert_eq!(store.len(), 1);
        assert!(cache.get::<Payload>("song:getSongDetail:10").await.is_some());
    }

    #[tokio::test]
    async fn test_purge_with_broken_store_is_zero() {
        let cache = QueryCache::new(Arc::new(BrokenStore), CacheSettings::default());
        assert_eq!(cache.purge_expired().await, 0);
    }
}
