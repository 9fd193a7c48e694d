//! Zone API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use shared::models::{Slot, Zone, ZoneCreate, ZoneDeleted, ZoneUpdate};

use crate::api::PARKING_MANAGERS;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::services::ZoneService;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub include_deleted: bool,
}

/// GET /api/zones - 获取区域 (默认不含已删除)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Zone>>> {
    if query.include_deleted && !user.has_role(PARKING_MANAGERS) {
        return Err(AppError::forbidden(
            "Only admins can list deleted zones",
        ));
    }
    let zones = ZoneService::new(&state)
        .list_zones(query.include_deleted)
        .await?;
    Ok(Json(zones))
}

/// GET /api/zones/deleted - 已软删除的区域
pub async fn list_deleted(State(state): State<ServerState>) -> AppResult<Json<Vec<Zone>>> {
    let zones = ZoneService::new(&state).list_deleted_zones().await?;
    Ok(Json(zones))
}

/// GET /api/zones/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Zone>> {
    let zone = ZoneService::new(&state).get_zone(&id).await?;
    Ok(Json(zone))
}

/// GET /api/zones/:id/slots
pub async fn list_slots(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Slot>>> {
    let slots = ZoneService::new(&state).list_zone_slots(&id).await?;
    Ok(Json(slots))
}

/// POST /api/zones - 创建区域
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ZoneCreate>,
) -> AppResult<(StatusCode, Json<Zone>)> {
    let zone = ZoneService::new(&state).create_zone(payload).await?;
    tracing::info!(zone_id = %zone.id, operator = %user.id, "Zone created via API");
    Ok((StatusCode::CREATED, Json(zone)))
}

/// PUT /api/zones/:id - 更新区域
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ZoneUpdate>,
) -> AppResult<Json<Zone>> {
    let zone = ZoneService::new(&state).update_zone(&id, payload).await?;
    Ok(Json(zone))
}

/// DELETE /api/zones/:id - 删除区域 (软删除)
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ZoneDeleted>> {
    let zone = ZoneService::new(&state).soft_delete_zone(&id).await?;
    tracing::info!(zone_id = %zone.id, operator = %user.id, "Zone deleted via API");
    Ok(Json(ZoneDeleted {
        message: "Zone deleted".to_string(),
        zone,
    }))
}

/// POST /api/zones/:id/restore - 撤销软删除
pub async fn restore(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Zone>> {
    let zone = ZoneService::new(&state).restore_zone(&id).await?;
    Ok(Json(zone))
}
