//! HTTP Middleware
//!
//! - 身份解析：Authorization 令牌 -> Caller（写入 request extensions）
//! - HTTP 状态码错误日志

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use super::extract::Caller;
use crate::application::SessionStore;

/// 取出令牌，兼容带或不带 `Bearer ` 前缀
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
    (!token.is_empty()).then(|| token.to_string())
}

/// 身份解析中间件
///
/// 无效或未知令牌按匿名处理，是否放行由各路由的提取器决定
pub async fn identity_middleware(
    State(sessions): State<Arc<SessionStore>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(request.headers()) {
        match sessions.resolve(&token).await {
            Some(identity) => {
                tracing::debug!(user_id = identity.user_id, role = ?identity.role, "Caller resolved");
                request.extensions_mut().insert(Caller { identity, token });
            }
            None => tracing::debug!("Unknown token, treating caller as anonymous"),
        }
    }

    next.run(request).await
}

/// HTTP 状态码错误日志中间件
///
/// 拦截 HTTP 响应，当状态码为 4xx 或 5xx 时记录日志
/// 注意：业务错误（code != 0）在 ApiError::into_response() 中记录
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP client error"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::get,
        Router,
    };
    use tower::util::ServiceExt;

    async fn ok_handler() -> &'static str {
        "OK"
    }

    async fn not_found_handler() -> StatusCode {
        StatusCode::NOT_FOUND
    }

    async fn error_handler() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn create_test_router() -> Router {
        Router::new()
            .route("/ok", get(ok_handler))
            .route("/not-found", get(not_found_handler))
            .route("/error", get(error_handler))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    #[tokio::test]
    async fn test_ok_response_no_log() {
        let app = create_test_router();
        let request = HttpRequest::builder()
            .uri("/ok")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_client_error_logs_warning() {
        let app = create_test_router();
        let request = HttpRequest::builder()
            .uri("/not-found")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_server_error_logs_error() {
        let app = create_test_router();
        let request = HttpRequest::builder()
            .uri("/error")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    mod identity {
        use super::super::*;
        use crate::application::{CacheSettings, QueryCache, DEFAULT_SESSION_TTL};
        use crate::domain::Identity;
        use crate::infrastructure::http::extract::{MaybeIdentity, RequireAdmin, RequireUser};
        use crate::infrastructure::memory::InMemoryCacheStore;
        use axum::{
            body::Body,
            http::{Request as HttpRequest, StatusCode},
            routing::get,
            Router,
        };
        use tower::util::ServiceExt;

        async fn whoami(MaybeIdentity(identity): MaybeIdentity) -> String {
            identity
                .map(|i| i.user_id.to_string())
                .unwrap_or_else(|| "anonymous".to_string())
        }

        async fn user_only(RequireUser(caller): RequireUser) -> String {
            caller.identity.user_id.to_string()
        }

        async fn admin_only(RequireAdmin(_): RequireAdmin) -> &'static str {
            "admin"
        }

        fn sessions() -> Arc<SessionStore> {
            let cache = Arc::new(QueryCache::new(
                InMemoryCacheStore::new().arc(),
                CacheSettings::default(),
            ));
            Arc::new(SessionStore::new(cache, DEFAULT_SESSION_TTL))
        }

        fn router(sessions: Arc<SessionStore>) -> Router {
            Router::new()
                .route("/whoami", get(whoami))
                .route("/user", get(user_only))
                .route("/admin", get(admin_only))
                .layer(axum::middleware::from_fn_with_state(
                    sessions,
                    identity_middleware,
                ))
        }

        async fn call(app: Router, uri: &str, auth: Option<&str>) -> (StatusCode, String) {
            let mut builder = HttpRequest::builder().uri(uri);
            if let Some(auth) = auth {
                builder = builder.header(AUTHORIZATION, auth);
            }
            let response = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap();
            (status, String::from_utf8(bytes.to_vec()).unwrap())
        }

        #[test]
        fn test_bearer_prefix_optional() {
            let mut headers = HeaderMap::new();
            headers.insert(AUTHORIZATION, "Bearer abc".parse().unwrap());
            assert_eq!(bearer_token(&headers).as_deref(), Some("abc"));

            headers.insert(AUTHORIZATION, "abc".parse().unwrap());
            assert_eq!(bearer_token(&headers).as_deref(), Some("abc"));

            headers.insert(AUTHORIZATION, "Bearer ".parse().unwrap());
            assert!(bearer_token(&headers).is_none());
        }

        #[tokio::test]
        async fn test_unknown_token_is_anonymous() {
            let app = router(sessions());
            let (status, body) = call(app, "/whoami", Some("Bearer nope")).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, "anonymous");
        }

        #[tokio::test]
        async fn test_roles_enforced() {
            let sessions = sessions();
            let user = sessions.issue(&Identity::user(7)).await;
            let admin = sessions.issue(&Identity::admin(1)).await;
            let app = router(sessions);

            let (status, body) = call(app.clone(), "/user", Some(&format!("Bearer {}", user))).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, "7");

            let (status, _) = call(app.clone(), "/user", None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);

            let (status, _) = call(app.clone(), "/admin", Some(&user)).await;
            assert_eq!(status, StatusCode::FORBIDDEN);

            let (status, _) = call(app, "/admin", Some(&admin)).await;
            assert_eq!(status, StatusCode::OK);
        }
    }
}
