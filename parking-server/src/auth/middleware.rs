//! 认证中间件
//!
//! 为 JWT 认证和角色授权提供 Axum 中间件

use axum::{
    extract::{Request, State},
    http::{HeaderMap, Uri},
    middleware::Next,
    response::Response,
};
use shared::models::Role;

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::security_log;

/// 无需认证的 API 路径
const PUBLIC_API_ROUTES: &[&str] = &[
    "/api/auth/register",
    "/api/auth/login",
    "/api/auth/forgot-password",
    "/api/auth/verify-otp",
    "/api/auth/reset-password",
];

pub fn is_public_path(path: &str) -> bool {
    !path.starts_with("/api/") || PUBLIC_API_ROUTES.contains(&path)
}

/// 校验 `Authorization` 头并解析出当前用户
pub(crate) fn authenticate(
    jwt_service: &JwtService,
    headers: &HeaderMap,
    uri: &Uri,
) -> Result<CurrentUser, AppError> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header).ok_or_else(|| {
            security_log!("WARN", "auth_malformed", uri = uri.to_string());
            AppError::unauthorized("Malformed token")
        })?,
        None => {
            security_log!("WARN", "auth_missing", uri = uri.to_string());
            return Err(AppError::unauthorized("No token provided"));
        }
    };

    match jwt_service.validate_token(token) {
        Ok(claims) => Ok(CurrentUser::from(claims)),
        Err(e) => {
            let expired = matches!(e, JwtError::ExpiredToken);
            security_log!(
                "WARN",
                "auth_failed",
                error = e.to_string(),
                expired = expired,
                uri = uri.to_string()
            );
            Err(AppError::InvalidToken)
        }
    }
}

/// 认证中间件 - 要求用户登录
///
/// 从 `Authorization: Bearer <token>` 头提取并验证 JWT。
/// 验证成功后将 [`CurrentUser`] 注入请求扩展。
///
/// # 跳过认证的路径
///
/// - `OPTIONS *` (CORS 预检)
/// - 非 `/api/` 路径 (`/health`)
/// - 注册、登录和找回密码接口
///
/// | 错误 | HTTP 状态码 |
/// |------|------------|
/// | 无 Authorization 头 / 格式错误 | 401 Unauthorized |
/// | 令牌过期或签名无效 | 401 InvalidToken |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS || is_public_path(req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let user = authenticate(&state.get_jwt_service(), req.headers(), req.uri())?;
    req.extensions_mut().insert(user.clone());
    let mut response = next.run(req).await;
    // 外层日志中间件从响应读取用户
    response.extensions_mut().insert(user);
    Ok(response)
}

/// 角色检查中间件 - 只放行指定角色
///
/// 必须挂在 [`require_auth`] 之后。
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/owner/admins", get(handler::list))
///     .layer(middleware::from_fn(require_role(&[Role::Owner])));
/// ```
pub fn require_role(
    allowed: &'static [Role],
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or_else(|| AppError::unauthorized("No token provided"))?;

            if !user.has_role(allowed) {
                security_log!(
                    "WARN",
                    "role_denied",
                    user_id = user.id.clone(),
                    user_role = user.role.as_str(),
                    uri = req.uri().to_string()
                );
                return Err(AppError::forbidden(
                    "You do not have permission to perform this action",
                ));
            }

            Ok(next.run(req).await)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_entry_points_and_health_are_public() {
        assert!(is_public_path("/health"));
        assert!(is_public_path("/api/auth/login"));
        assert!(is_public_path("/api/auth/reset-password"));
        assert!(!is_public_path("/api/auth/me"));
        assert!(!is_public_path("/api/auth/change-password"));
        assert!(!is_public_path("/api/zones"));
    }
}
