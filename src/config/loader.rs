//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, CacheBackend};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `VIBE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `VIBE_SERVER__PORT=9090`
/// - `VIBE_CACHE__BACKEND=sled`
/// - `VIBE_CACHE__REDIS_URL=redis://cache:6379/0`
/// - `VIBE_DATABASE__PATH=/data/vibe.db`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8080)?
        .set_default("database.path", "data/vibe.db")?
        .set_default("database.max_connections", 5)?
        .set_default("cache.backend", "memory")?
        .set_default("cache.default_ttl_secs", 3600)?
        .set_default("cache.op_timeout_ms", 3000)?
        .set_default("cache.purge_interval_secs", 300)?
        .set_default("cache.sled_path", "data/cache.sled")?
        .set_default("cache.redis_url", "redis://127.0.0.1:6379/0")?
        .set_default("storage.blob_dir", "data/blobs")?
        .set_default("storage.max_upload_size", 50 * 1024 * 1024)?
        .set_default("recommendation.quota", 10)?
        .set_default("recommendation.max_fill_attempts", 8)?
        .set_default("recommendation.fill_deadline_ms", 2000)?
        .set_default("session.ttl_secs", 43200)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 例如: VIBE_CACHE__BACKEND=redis
    builder = builder.add_source(
        Environment::with_prefix("VIBE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    let invalid = |msg: &str| Err(ConfigError::ValidationError(msg.to_string()));

    if config.server.port == 0 {
        return invalid("Server port cannot be 0");
    }

    if config.database.path.is_empty() {
        return invalid("Database path cannot be empty");
    }

    if config.cache.default_ttl_secs == 0 {
        return invalid("Cache default TTL cannot be 0");
    }

    if config.cache.op_timeout_ms == 0 {
        return invalid("Cache operation timeout cannot be 0");
    }

    if config.cache.purge_interval_secs == 0 {
        return invalid("Cache purge interval cannot be 0");
    }

    if config.cache.backend == CacheBackend::Redis && config.cache.redis_url.is_empty() {
        return invalid("Redis URL cannot be empty when the redis backend is selected");
    }

    if config.recommendation.quota == 0 {
        return invalid("Recommendation quota cannot be 0");
    }

    if config.recommendation.max_fill_attempts == 0 {
        return invalid("Recommendation max fill attempts cannot be 0");
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Public Base URL: {}", config.server.public_base_url());
    tracing::info!("Database: {}", config.database.path);
    tracing::info!("Database Max Connections: {}", config.database.max_connections);
    tracing::info!("Cache Backend: {:?}", config.cache.backend);
    tracing::info!("Cache Default TTL: {}s", config.cache.default_ttl_secs);
    tracing::info!("Cache Purge Interval: {}s", config.cache.purge_interval_secs);
    tracing::info!("Blob Directory: {:?}", config.storage.blob_dir);
    tracing::info!("Recommendation Quota: {}", config.recommendation.quota);
    tracing::info!("Session TTL: {}s", config.session.ttl_secs);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_zero_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_db_path() {
        let mut config = AppConfig::default();
        config.database.path = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_cache_timings() {
        let mut config = AppConfig::default();
        config.cache.default_ttl_secs = 0;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.cache.op_timeout_ms = 0;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.cache.purge_interval_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_redis_without_url() {
        let mut config = AppConfig::default();
        config.cache.backend = CacheBackend::Redis;
        config.cache.redis_url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_zero_recommendation() {
        let mut config = AppConfig::default();
        config.recommendation.quota = 0;
        assert!(validate_config(&config).is_err());

        let mut config = AppConfig::default();
        config.recommendation.max_fill_attempts = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9090\n\n[cache]\nbackend = \"sled\"\n\n[recommendation]\nquota = 6"
        )
        .unwrap();

        let config = load_config_from_path(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.cache.backend, CacheBackend::Sled);
        assert_eq!(config.recommendation.quota, 6);
        assert_eq!(config.database.path, "data/vibe.db");
    }
}
