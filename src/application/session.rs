//! 登录会话
//!
//! token -> Identity 存放在缓存中（`token:{token}`），固定 TTL。
//! 令牌签发由上游认证服务负责，这里负责解析与吊销

use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use super::cache::QueryCache;
use crate::domain::Identity;

/// 默认会话有效期 12 小时
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(12 * 60 * 60);

const TOKEN_PREFIX: &str = "token";

/// 会话存储
pub struct SessionStore {
    cache: Arc<QueryCache>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(cache: Arc<QueryCache>, ttl: Duration) -> Self {
        Self { cache, ttl }
    }

    fn key(token: &str) -> String {
        format!("{}:{}", TOKEN_PREFIX, token)
    }

    /// 解析令牌，未知或缓存不可用时返回 None（按匿名处理）
    pub async fn resolve(&self, token: &str) -> Option<Identity> {
        if token.is_empty() {
            return None;
        }
        self.cache.get::<Identity>(&Self::key(token)).await
    }

    /// 签发新令牌
    pub async fn issue(&self, identity: &Identity) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.cache
            .set_with_ttl(&Self::key(&token), identity, Some(self.ttl))
            .await;
        tracing::info!(user_id = identity.user_id, role = ?identity.role, "Session issued");
        token
    }

    /// 吊销令牌
    pub async fn revoke(&self, token: &str) {
        self.cache.delete(&Self::key(token)).await;
        tracing::info!("Session revoked");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::cache::{CacheDomain, CacheSettings};
    use crate::infrastructure::memory::InMemoryCacheStore;

    fn store() -> SessionStore {
        let cache = Arc::new(QueryCache::new(
            Arc::new(InMemoryCacheStore::new()),
            CacheSettings::default(),
        ));
        SessionStore::new(cache, DEFAULT_SESSION_TTL)
    }

    #[tokio::test]
    async fn test_issue_resolve_revoke() {
        let sessions = store();
        let token = sessions.issue(&Identity::user(5)).await;

        assert_eq!(sessions.resolve(&token).await, Some(Identity::user(5)));

        sessions.revoke(&token).await;
        assert_eq!(sessions.resolve(&token).await, None);
    }

    #[tokio::test]
    async fn test_unknown_token_is_anonymous() {
        let sessions = store();
        assert_eq!(sessions.resolve("nope").await, None);
        assert_eq!(sessions.resolve("").await, None);
    }

    #[tokio::test]
    async fn test_sessions_survive_domain_invalidation() {
        let sessions = store();
        let token = sessions.issue(&Identity::admin(1)).await;

        sessions.cache.invalidate(CacheDomain::User).await;
        assert!(sessions.resolve(&token).await.is_some());
    }
}
