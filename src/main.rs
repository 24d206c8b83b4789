//! Vibe Music - 音乐流媒体目录服务
//!
//! - Domain: catalog, identity, recommendation
//! - Application: commands, queries, cache, ports
//! - Infrastructure: http, memory, persistence, adapters

use std::sync::Arc;

use vibe_music::application::{CacheStorePort, QueryCache, SessionStore};
use vibe_music::config::{load_config, print_config, AppConfig, CacheBackend};
use vibe_music::infrastructure::adapters::LocalBlobStorage;
use vibe_music::infrastructure::http::{AppState, HttpServer, Repositories, ServerConfig};
use vibe_music::infrastructure::memory::InMemoryCacheStore;
use vibe_music::infrastructure::persistence::sled::SledCacheStore;
use vibe_music::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig,
};

/// 按配置选择缓存后端
async fn build_cache_store(config: &AppConfig) -> anyhow::Result<Arc<dyn CacheStorePort>> {
    let store: Arc<dyn CacheStorePort> = match config.cache.backend {
        CacheBackend::Memory => InMemoryCacheStore::new().arc(),
        CacheBackend::Sled => SledCacheStore::open(&config.cache.sled_path)?.arc(),
        #[cfg(feature = "cache-redis")]
        CacheBackend::Redis => {
            vibe_music::infrastructure::persistence::RedisCacheStore::connect(
                &config.cache.redis_url,
            )
            .await?
            .arc()
        }
        #[cfg(not(feature = "cache-redis"))]
        CacheBackend::Redis => {
            anyhow::bail!("Redis cache backend requires the `cache-redis` feature")
        }
    };
    Ok(store)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},vibe_music={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("Vibe Music - 音乐目录服务");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig {
        database_url: config.database.database_url(),
        max_connections: config.database.max_connections,
    };
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 查询缓存与会话
    let store = build_cache_store(&config).await?;
    let cache = Arc::new(QueryCache::new(store, config.cache.settings()));
    let _expiry_sweep = cache.spawn_expiry_sweep();
    let sessions = Arc::new(SessionStore::new(cache.clone(), config.session.ttl()));

    // 上传文件存储
    let storage = Arc::new(
        LocalBlobStorage::new(&config.storage.blob_dir, config.server.public_base_url()).await?,
    );

    let state = AppState::new(
        Repositories::sqlite(pool),
        storage,
        cache,
        sessions,
        config.recommendation.settings(),
    );

    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_max_upload_size(config.storage.max_upload_size)
        .with_blob_dir(&config.storage.blob_dir);
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    server
        .run_with_shutdown(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => tracing::info!("Received shutdown signal"),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to listen for ctrl-c");
                    std::future::pending::<()>().await;
                }
            }
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
