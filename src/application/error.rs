//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::{BlobStorageError, RepositoryError};
use crate::domain::catalog::CatalogError;
use crate::domain::ProfileError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 资源未找到
    #[error("{0} not found")]
    NotFound(String),

    /// 验证错误
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 资源冲突（重复添加、重复收藏等）
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 未登录
    #[error("Unauthorized")]
    Unauthorized,

    /// 无权限
    #[error("Forbidden")]
    Forbidden,

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }

    /// 创建冲突错误
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => Self::NotFound(msg),
            RepositoryError::Duplicate(msg) => Self::Conflict(msg),
            other => Self::RepositoryError(other.to_string()),
        }
    }
}

impl From<BlobStorageError> for ApplicationError {
    fn from(err: BlobStorageError) -> Self {
        Self::StorageError(err.to_string())
    }
}

impl From<CatalogError> for ApplicationError {
    fn from(err: CatalogError) -> Self {
        Self::ValidationError(err.to_string())
    }
}

impl From<ProfileError> for ApplicationError {
    fn from(err: ProfileError) -> Self {
        Self::ValidationError(err.to_string())
    }
}
