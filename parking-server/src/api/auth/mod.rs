//! Authentication Routes

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Build authentication router
/// - register, login and the password-reset flow are public
/// - /api/auth/me and /api/auth/change-password go through require_auth
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/register", post(handler::register))
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/forgot-password", post(handler::forgot_password))
        .route("/api/auth/verify-otp", post(handler::verify_otp))
        .route("/api/auth/reset-password", post(handler::reset_password))
        .route("/api/auth/me", get(handler::me))
        .route("/api/auth/change-password", put(handler::change_password))
}
