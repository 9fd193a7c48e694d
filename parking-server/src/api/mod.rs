//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 注册、登录、密码重置
//! - [`zones`] - 停车区域 (软删除/恢复)
//! - [`slots`] - 车位 (状态、预约)
//! - [`owner`] - OWNER 管理员账号管理
//! - [`admin`] - 用户目录

pub mod convert;
pub mod router_ext;

pub mod admin;
pub mod auth;
pub mod health;
pub mod owner;
pub mod slots;
pub mod zones;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue, Method, header};
use shared::models::Role;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;
use crate::core::middleware;

pub use router_ext::{OneshotResult, OneshotRouter};

/// Roles that manage zones and slots
pub const PARKING_MANAGERS: &[Role] = &Role::PARKING_MANAGERS;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        // Health API - public route
        .merge(health::router())
        // Auth API - register/login/reset public, rest authenticated
        .merge(auth::router())
        // Zone/Slot API - authenticated read, manager write
        .merge(zones::router())
        .merge(slots::router())
        // Owner API - OWNER only
        .merge(owner::router())
        // User directory - OWNER / ADMIN
        .merge(admin::router())
}

/// Build a fully configured application with all middleware
///
/// Used by both the HTTP server and oneshot calls
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    // Later layers wrap earlier ones; the last one added runs first
    build_router()
        // ========== Application Middleware ==========
        // JWT authentication - injects CurrentUser for handlers and role checks
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ))
        // Request logging - sees 401s from authentication too
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        // ========== Tower HTTP Middleware ==========
        // Compression - Gzip compress responses
        .layer(CompressionLayer::new())
        // Body limit - JSON payloads are small
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        // CORS - answers preflight before authentication
        .layer(cors_layer(&state.config.cors_origins))
        // Trace - Request tracing
        .layer(TraceLayer::new_for_http())
        // Propagate request ID to response
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        // Request ID - outermost, so every layer above sees it
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
}

/// CORS for the configured origins; empty means any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}
