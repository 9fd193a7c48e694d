//! Slot API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use shared::MessageResponse;
use shared::models::{Slot, SlotCreate, SlotUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::SlotService;
use crate::utils::AppResult;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub zone: Option<String>,
}

/// GET /api/slots?zone=<id>
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Slot>>> {
    let slots = SlotService::new(&state)
        .list_slots(query.zone.as_deref())
        .await?;
    Ok(Json(slots))
}

/// GET /api/slots/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Slot>> {
    let slot = SlotService::new(&state).get_slot(&id).await?;
    Ok(Json(slot))
}

/// POST /api/slots - 创建车位
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SlotCreate>,
) -> AppResult<(StatusCode, Json<Slot>)> {
    let slot = SlotService::new(&state).create_slot(payload).await?;
    Ok((StatusCode::CREATED, Json(slot)))
}

/// PUT /api/slots/:id - 重命名 / 覆盖状态 (不检查预约时段)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<SlotUpdate>,
) -> AppResult<Json<Slot>> {
    let slot = SlotService::new(&state).update_slot(&id, payload).await?;
    tracing::debug!(slot_id = %slot.id, operator = %user.id, "Slot updated via API");
    Ok(Json(slot))
}

/// DELETE /api/slots/:id - 硬删除
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    SlotService::new(&state).delete_slot(&id).await?;
    Ok(Json(MessageResponse::new("Slot deleted successfully")))
}

/// POST /api/slots/:id/reserve - 学生/教师预约 (仅在预约时段内)
pub async fn reserve(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Slot>> {
    let slot = SlotService::new(&state).reserve_slot(&id, &user).await?;
    Ok(Json(slot))
}
