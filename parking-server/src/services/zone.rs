//! Zone lifecycle
//!
//! Zones are soft-deleted: `is_deleted` hides them from normal listings and
//! `restore_zone` brings them back. Child slots are never touched.

use shared::models::{Slot, Zone, ZoneCreate, ZoneUpdate};

use crate::api::convert::convert_all;
use crate::core::ServerState;
use crate::db::models::{self as db, DeletePolicy};
use crate::db::repository::{SlotRepository, ZoneRepository, parse_record_id};
use crate::utils::time::now_millis;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

const _: () = assert!(<db::Zone as DeletePolicy>::SUPPORTS_RESTORE);

#[derive(Clone)]
pub struct ZoneService {
    zones: ZoneRepository,
    slots: SlotRepository,
}

impl ZoneService {
    pub fn new(state: &ServerState) -> Self {
        let db = state.get_db();
        Self {
            zones: ZoneRepository::new(db.clone()),
            slots: SlotRepository::new(db),
        }
    }

    pub async fn create_zone(&self, req: ZoneCreate) -> AppResult<Zone> {
        let name = req.name.trim().to_string();
        validate_required_text(&name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&req.description, "description", MAX_NOTE_LEN)?;

        let now = now_millis();
        let zone = self
            .zones
            .create(db::NewZone {
                name,
                description: req.description.unwrap_or_default(),
                is_deleted: false,
                created_at: now,
                updated_at: now,
            })
            .await?;
        tracing::info!(zone_id = %zone.id, name = %zone.name, "Zone created");
        Ok(zone.into())
    }

    /// Visible zones; soft-deleted ones only when asked
    pub async fn list_zones(&self, include_deleted: bool) -> AppResult<Vec<Zone>> {
        let zones = self.zones.find_all(include_deleted).await?;
        Ok(convert_all(zones))
    }

    pub async fn list_deleted_zones(&self) -> AppResult<Vec<Zone>> {
        let zones = self.zones.find_deleted().await?;
        Ok(convert_all(zones))
    }

    /// Lookup regardless of the soft-delete flag
    pub async fn get_zone(&self, zone_id: &str) -> AppResult<Zone> {
        let id = parse_record_id("zone", zone_id)?;
        let zone = self
            .zones
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Zone {zone_id} not found")))?;
        Ok(zone.into())
    }

    pub async fn update_zone(&self, zone_id: &str, req: ZoneUpdate) -> AppResult<Zone> {
        let id = parse_record_id("zone", zone_id)?;
        let name = req.name.map(|n| n.trim().to_string());
        if let Some(name) = &name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        validate_optional_text(&req.description, "description", MAX_NOTE_LEN)?;

        let zone = self
            .zones
            .update(&id, name, req.description, now_millis())
            .await?;
        tracing::info!(zone_id = %zone.id, "Zone updated");
        Ok(zone.into())
    }

    /// Mark deleted. Deleting an already-deleted zone succeeds unchanged.
    pub async fn soft_delete_zone(&self, zone_id: &str) -> AppResult<Zone> {
        self.set_deleted(zone_id, true).await
    }

    /// Undo [`Self::soft_delete_zone`]; idempotent
    pub async fn restore_zone(&self, zone_id: &str) -> AppResult<Zone> {
        self.set_deleted(zone_id, false).await
    }

    async fn set_deleted(&self, zone_id: &str, deleted: bool) -> AppResult<Zone> {
        let id = parse_record_id("zone", zone_id)?;
        let current = self
            .zones
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Zone {zone_id} not found")))?;
        if current.is_deleted == deleted {
            return Ok(current.into());
        }

        let zone = self.zones.set_deleted(&id, deleted, now_millis()).await?;
        if deleted {
            tracing::info!(zone_id = %zone.id, "Zone soft-deleted");
        } else {
            tracing::info!(zone_id = %zone.id, "Zone restored");
        }
        Ok(zone.into())
    }

    /// Slots of a zone, including those of a soft-deleted zone
    pub async fn list_zone_slots(&self, zone_id: &str) -> AppResult<Vec<Slot>> {
        let id = parse_record_id("zone", zone_id)?;
        if self.zones.find_by_id(&id).await?.is_none() {
            return Err(AppError::not_found(format!("Zone {zone_id} not found")));
        }
        let slots = self.slots.find_by_zone(&id).await?;
        Ok(convert_all(slots))
    }
}
