//! 身份提取器
//!
//! identity_middleware 解析出的 Caller 放在 request extensions 中，
//! 这里按路由要求取出：可选 / 普通用户 / 管理员

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use super::error::ApiError;
use crate::domain::Identity;

/// 已解析的调用方及其令牌（登出、注销时需要吊销）
#[derive(Debug, Clone)]
pub struct Caller {
    pub identity: Identity,
    pub token: String,
}

/// 可选身份，匿名时为 None
pub struct MaybeIdentity(pub Option<Identity>);

impl MaybeIdentity {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for MaybeIdentity {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeIdentity(
            parts.extensions.get::<Caller>().map(|c| c.identity.clone()),
        ))
    }
}

/// 必须是普通用户
pub struct RequireUser(pub Caller);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequireUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let caller = parts
            .extensions
            .get::<Caller>()
            .cloned()
            .ok_or(ApiError::Unauthorized)?;
        if !caller.identity.is_user() {
            return Err(ApiError::Forbidden);
        }
        Ok(RequireUser(caller))
    }
}

/// 必须是管理员
pub struct RequireAdmin(pub Caller);

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for RequireAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let caller = parts
            .extensions
            .get::<Caller>()
            .cloned()
            .ok_or(ApiError::Unauthorized)?;
        if !caller.identity.is_admin() {
            return Err(ApiError::Forbidden);
        }
        Ok(RequireAdmin(caller))
    }
}
