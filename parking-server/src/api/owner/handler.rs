//! Owner API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::MessageResponse;
use shared::models::{AdminSummary, AdminToggled, UserCreate, UserInfo};

use crate::core::ServerState;
use crate::services::AdminService;
use crate::utils::AppResult;

/// POST /api/owner/users
pub async fn create_user(
    State(state): State<ServerState>,
    Json(payload): Json<UserCreate>,
) -> AppResult<(StatusCode, Json<UserInfo>)> {
    let user = AdminService::new(&state).create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/owner/admins
pub async fn list_admins(State(state): State<ServerState>) -> AppResult<Json<Vec<AdminSummary>>> {
    let admins = AdminService::new(&state).list_admins().await?;
    Ok(Json(admins))
}

/// PATCH /api/owner/admins/:id
pub async fn toggle_admin(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AdminToggled>> {
    let enabled = AdminService::new(&state).toggle_admin_status(&id).await?;
    let message = if enabled {
        "Admin enabled"
    } else {
        "Admin disabled"
    };
    Ok(Json(AdminToggled {
        message: message.to_string(),
        enabled,
    }))
}

/// DELETE /api/owner/admins/:id
pub async fn delete_admin(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    AdminService::new(&state).delete_admin(&id).await?;
    Ok(Json(MessageResponse::new("Admin deleted successfully")))
}
