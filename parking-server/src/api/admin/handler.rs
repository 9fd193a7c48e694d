use axum::{
    Json,
    extract::{Path, State},
};
use shared::models::{UserInfo, UserStatusUpdate};

use crate::core::ServerState;
use crate::services::AdminService;
use crate::utils::AppResult;

/// GET /api/admin/users - 全部用户 (不含凭据)
pub async fn list_users(State(state): State<ServerState>) -> AppResult<Json<Vec<UserInfo>>> {
    let users = AdminService::new(&state).list_users().await?;
    Ok(Json(users))
}

/// PATCH /api/admin/users/:id/status
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UserStatusUpdate>,
) -> AppResult<Json<UserInfo>> {
    let user = AdminService::new(&state)
        .set_user_status(&id, payload.is_active)
        .await?;
    Ok(Json(user))
}
