//! 统一错误处理
//!
//! [`AppError`] 是所有 handler / service 的错误类型，响应体统一为
//! `{"message": "..."}`。
//!
//! | 变体 | 状态码 |
//! |------|--------|
//! | Validation / Duplicate / LastAdminGuard / OtpInvalid / ReservationClosed | 400 |
//! | Unauthorized / InvalidToken / InvalidCredentials | 401 |
//! | Forbidden | 403 |
//! | NotFound | 404 |
//! | Database / Internal | 500 |
//!
//! 500 类错误只记录日志，不把细节返回给客户端。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::ErrorBody;
use tracing::error;

use crate::db::repository::RepoError;

/// Application-level Result type
pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 请求错误 (400) ==========
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Duplicate(String),

    /// Refused because it would leave zero active admins
    #[error("{0}")]
    LastAdminGuard(String),

    #[error("Invalid or expired OTP")]
    OtpInvalid,

    #[error("{0}")]
    ReservationClosed(String),

    // ========== 认证错误 (401) ==========
    /// Missing or malformed Authorization header
    #[error("{0}")]
    Unauthorized(String),

    #[error("Invalid or expired token")]
    InvalidToken,

    /// Unknown email, wrong password and inactive account all look the same
    #[error("Invalid credentials")]
    InvalidCredentials,

    // ========== 权限错误 (403) ==========
    #[error("{0}")]
    Forbidden(String),

    // ========== 资源错误 (404) ==========
    #[error("{0}")]
    NotFound(String),

    // ========== 系统错误 (500) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::Duplicate(_)
            | AppError::LastAdminGuard(_)
            | AppError::OtpInvalid
            | AppError::ReservationClosed(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) | AppError::InvalidToken | AppError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the caller.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Database(_) | AppError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
            }
            _ => {}
        }

        let body = Json(ErrorBody::new(self.public_message()));
        (self.status_code(), body).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Duplicate(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::LastAdminGuard("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::forbidden("x").status_code(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn server_errors_hide_details() {
        let response = AppError::database("connection reset by peer").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.message, "Internal server error");
    }

    #[tokio::test]
    async fn client_errors_carry_message() {
        let response =
            AppError::LastAdminGuard("At least one admin must remain active".into()).into_response();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.message, "At least one admin must remain active");
    }
}
