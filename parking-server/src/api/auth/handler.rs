//! Authentication Handlers
//!
//! Handles login, registration, password change and OTP-based reset

use axum::{Json, extract::State, http::StatusCode};
use shared::MessageResponse;
use shared::client::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, LoginResponse, RegisterRequest,
    ResetPasswordRequest, VerifyOtpRequest,
};
use shared::models::UserInfo;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::AuthService;
use crate::utils::AppResult;

/// POST /api/auth/register - 自助注册 (STUDENT / TEACHER)
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<LoginResponse>)> {
    let resp = AuthService::new(&state).register(req).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

/// POST /api/auth/login
///
/// Unknown email, wrong password and disabled account all return the same
/// 401 after the same delay.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let resp = AuthService::new(&state)
        .authenticate(&req.email, &req.password)
        .await?;
    Ok(Json(resp))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<UserInfo>> {
    let info = AuthService::new(&state).me(&user.id).await?;
    Ok(Json(info))
}

/// PUT /api/auth/change-password
pub async fn change_password(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    AuthService::new(&state)
        .change_password(&user.id, &req.old_password, &req.new_password)
        .await?;
    Ok(Json(MessageResponse::new("Password changed successfully")))
}

/// POST /api/auth/forgot-password - 生成 OTP (不在响应中返回)
pub async fn forgot_password(
    State(state): State<ServerState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    AuthService::new(&state).issue_otp(&req.email).await?;
    Ok(Json(MessageResponse::new("OTP sent")))
}

/// POST /api/auth/verify-otp
pub async fn verify_otp(
    State(state): State<ServerState>,
    Json(req): Json<VerifyOtpRequest>,
) -> AppResult<Json<MessageResponse>> {
    AuthService::new(&state)
        .verify_otp(&req.email, &req.otp)
        .await?;
    Ok(Json(MessageResponse::new("OTP verified")))
}

/// POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<ServerState>,
    Json(req): Json<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    AuthService::new(&state)
        .reset_password(&req.email, &req.new_password)
        .await?;
    Ok(Json(MessageResponse::new("Password reset successful")))
}
