//! Vibe Music - 音乐流媒体目录服务
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Catalog: 歌曲、歌单、歌手、风格等值对象
//! - Identity: 调用方身份与角色
//! - Recommendation / Membership: 推荐流程中的纯函数
//!
//! 应用层 (application/):
//! - Ports: 端口定义（Repositories, CacheStore, BlobStorage）
//! - Cache: Read-Through 查询缓存与按域失效
//! - Commands / Queries: CQRS 处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API
//! - Memory: 进程内缓存
//! - Persistence: SQLite 记录存储 + Sled / Redis 缓存
//! - Adapters: 本地文件存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
