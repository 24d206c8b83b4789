//! HTTP Error Handling
//!
//! 业务失败统一 HTTP 200 + `code: 1`，认证失败使用 401 / 403

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::ApiResponse;
use crate::application::ApplicationError;

/// 对外消息
pub mod message {
    pub const NOT_FOUND: &str = "未找到相关数据";
    pub const INTERNAL_ERROR: &str = "系统内部错误";
    pub const UNAUTHORIZED: &str = "未登录或登录已过期";
    pub const FORBIDDEN: &str = "没有访问权限";
}

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Unauthorized,
    Forbidden,
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::NotFound(detail) => {
                tracing::warn!(detail = %detail, "Resource not found");
                (StatusCode::OK, ApiResponse::failure(message::NOT_FOUND))
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Bad request");
                (StatusCode::OK, ApiResponse::failure(msg.clone()))
            }
            ApiError::Conflict(msg) => {
                tracing::warn!(error = %msg, "Resource conflict");
                (StatusCode::OK, ApiResponse::failure(msg.clone()))
            }
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ApiResponse::failure(message::UNAUTHORIZED),
            ),
            ApiError::Forbidden => (
                StatusCode::FORBIDDEN,
                ApiResponse::failure(message::FORBIDDEN),
            ),
            ApiError::Internal(detail) => {
                // 细节只进日志
                tracing::error!(error = %detail, "Internal server error");
                (StatusCode::OK, ApiResponse::failure(message::INTERNAL_ERROR))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::NotFound(resource) => ApiError::NotFound(resource),
            ApplicationError::ValidationError(msg) => ApiError::BadRequest(msg),
            ApplicationError::Conflict(msg) => ApiError::Conflict(msg),
            ApplicationError::Unauthorized => ApiError::Unauthorized,
            ApplicationError::Forbidden => ApiError::Forbidden,
            ApplicationError::RepositoryError(msg)
            | ApplicationError::StorageError(msg)
            | ApplicationError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_internal_details_hidden() {
        let err = ApiError::from(ApplicationError::RepositoryError("disk I/O error".into()));
        let (status, json) = body_json(err).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["code"], 1);
        assert_eq!(json["message"], message::INTERNAL_ERROR);
    }

    #[tokio::test]
    async fn test_not_found_message() {
        let (_, json) = body_json(ApplicationError::not_found("Song").into()).await;
        assert_eq!(json["message"], message::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_auth_status_codes() {
        let (status, _) = body_json(ApiError::Unauthorized).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let (status, _) = body_json(ApiError::Forbidden).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_validation_message_passthrough() {
        let (_, json) = body_json(ApplicationError::conflict("歌手已存在").into()).await;
        assert_eq!(json["message"], "歌手已存在");
    }
}
