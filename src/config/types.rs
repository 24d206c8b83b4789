//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::application::{CacheSettings, RecommendationSettings};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 数据库配置
    #[serde(default)]
    pub database: DatabaseConfig,

    /// 查询缓存配置
    #[serde(default)]
    pub cache: CacheConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 推荐配置
    #[serde(default)]
    pub recommendation: RecommendationConfig,

    /// 会话配置
    #[serde(default)]
    pub session: SessionConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL（上传文件的 URL 前缀）
    /// 如果未设置，则使用 http://{host}:{port}
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            base_url: None,
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 获取公开的 Base URL
    pub fn public_base_url(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            let host = if self.host == "0.0.0.0" {
                "localhost"
            } else {
                &self.host
            };
            format!("http://{}:{}", host, self.port)
        })
    }
}

/// 数据库配置
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// 数据库文件路径
    #[serde(default = "default_db_path")]
    pub path: String,

    /// 最大连接数
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_db_path() -> String {
    "data/vibe.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

impl DatabaseConfig {
    /// 获取数据库 URL
    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path)
    }
}

/// 缓存后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Memory,
    Sled,
    Redis,
}

/// 查询缓存配置
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,

    /// 查询结果默认 TTL（秒）
    #[serde(default = "default_ttl_secs")]
    pub default_ttl_secs: u64,

    /// 单次缓存操作超时（毫秒），超时按未命中处理
    #[serde(default = "default_op_timeout_ms")]
    pub op_timeout_ms: u64,

    /// 过期条目后台清理间隔（秒）
    #[serde(default = "default_purge_interval_secs")]
    pub purge_interval_secs: u64,

    #[serde(default = "default_sled_path")]
    pub sled_path: PathBuf,

    #[serde(default = "default_redis_url")]
    pub redis_url: String,
}

fn default_ttl_secs() -> u64 {
    3600
}

fn default_op_timeout_ms() -> u64 {
    3000
}

fn default_purge_interval_secs() -> u64 {
    300
}

fn default_sled_path() -> PathBuf {
    PathBuf::from("data/cache.sled")
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379/0".to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            default_ttl_secs: default_ttl_secs(),
            op_timeout_ms: default_op_timeout_ms(),
            purge_interval_secs: default_purge_interval_secs(),
            sled_path: default_sled_path(),
            redis_url: default_redis_url(),
        }
    }
}

impl CacheConfig {
    pub fn settings(&self) -> CacheSettings {
        CacheSettings {
            default_ttl: Duration::from_secs(self.default_ttl_secs),
            op_timeout: Duration::from_millis(self.op_timeout_ms),
            purge_interval: Duration::from_secs(self.purge_interval_secs),
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 上传文件（封面、音频、头像、海报）根目录
    #[serde(default = "default_blob_dir")]
    pub blob_dir: PathBuf,

    /// 上传文件最大大小（字节），默认 50MB
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: usize,
}

fn default_blob_dir() -> PathBuf {
    PathBuf::from("data/blobs")
}

fn default_max_upload_size() -> usize {
    50 * 1024 * 1024 // 50 MB
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            blob_dir: default_blob_dir(),
            max_upload_size: default_max_upload_size(),
        }
    }
}

/// 推荐配置
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationConfig {
    /// 推荐数量
    #[serde(default = "default_quota")]
    pub quota: usize,

    /// 随机补充最大轮数
    #[serde(default = "default_max_fill_attempts")]
    pub max_fill_attempts: u32,

    /// 随机补充截止时间（毫秒）
    #[serde(default = "default_fill_deadline_ms")]
    pub fill_deadline_ms: u64,
}

fn default_quota() -> usize {
    10
}

fn default_max_fill_attempts() -> u32 {
    8
}

fn default_fill_deadline_ms() -> u64 {
    2000
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            quota: default_quota(),
            max_fill_attempts: default_max_fill_attempts(),
            fill_deadline_ms: default_fill_deadline_ms(),
        }
    }
}

impl RecommendationConfig {
    pub fn settings(&self) -> RecommendationSettings {
        RecommendationSettings {
            quota: self.quota,
            max_fill_attempts: self.max_fill_attempts,
            fill_deadline: Duration::from_millis(self.fill_deadline_ms),
        }
    }
}

/// 会话配置
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// 令牌有效期（秒）
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
}

fn default_session_ttl() -> u64 {
    43200 // 12 小时
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_session_ttl(),
        }
    }
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
