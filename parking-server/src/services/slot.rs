//! Slot lifecycle
//!
//! Slots are hard-deleted. Admin status writes are unconditional; the
//! reserve path adds the daily window, role and AVAILABLE checks.

use chrono::NaiveTime;
use shared::ReservationWindow;
use shared::models::{Role, Slot, SlotCreate, SlotStatus, SlotUpdate};

use crate::api::convert::convert_all;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{self as db, DeletePolicy};
use crate::db::repository::{SlotChanges, SlotRepository, ZoneRepository, parse_record_id};
use crate::utils::time::{local_time, now_millis};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{AppError, AppResult};

const _: () = assert!(!<db::Slot as DeletePolicy>::SUPPORTS_RESTORE);

/// Roles allowed to reserve a slot for themselves
pub const RESERVER_ROLES: &[Role] = &[Role::Student, Role::Teacher];

#[derive(Clone)]
pub struct SlotService {
    slots: SlotRepository,
    zones: ZoneRepository,
    window: ReservationWindow,
}

impl SlotService {
    pub fn new(state: &ServerState) -> Self {
        let db = state.get_db();
        Self {
            slots: SlotRepository::new(db.clone()),
            zones: ZoneRepository::new(db),
            window: state.reservation_window(),
        }
    }

    /// New slot in an existing zone, starting AVAILABLE
    pub async fn create_slot(&self, req: SlotCreate) -> AppResult<Slot> {
        let number = req.number.trim().to_string();
        validate_required_text(&number, "number", MAX_NAME_LEN)?;

        let zone_id = parse_record_id("zone", &req.zone)?;
        if self.zones.find_by_id(&zone_id).await?.is_none() {
            return Err(AppError::not_found(format!("Zone {} not found", req.zone)));
        }

        let now = now_millis();
        let slot = self
            .slots
            .create(db::NewSlot {
                number,
                zone: zone_id,
                status: SlotStatus::Available,
                created_at: now,
                updated_at: now,
            })
            .await?;
        tracing::info!(slot_id = %slot.id, zone_id = %slot.zone, "Slot created");
        Ok(slot.into())
    }

    /// All slots, or only those of `zone`
    pub async fn list_slots(&self, zone: Option<&str>) -> AppResult<Vec<Slot>> {
        let slots = match zone {
            Some(zone) => {
                let zone_id = parse_record_id("zone", zone)?;
                self.slots.find_by_zone(&zone_id).await?
            }
            None => self.slots.find_all().await?,
        };
        Ok(convert_all(slots))
    }

    pub async fn get_slot(&self, slot_id: &str) -> AppResult<Slot> {
        let id = parse_record_id("slot", slot_id)?;
        self.slots
            .find_by_id(&id)
            .await?
            .map(Slot::from)
            .ok_or_else(|| AppError::not_found(format!("Slot {slot_id} not found")))
    }

    /// Rename and/or overwrite the status.
    ///
    /// Any status may follow any other. Moving to AVAILABLE clears the
    /// assignee; other statuses keep it.
    pub async fn update_slot(&self, slot_id: &str, req: SlotUpdate) -> AppResult<Slot> {
        let id = parse_record_id("slot", slot_id)?;
        let current = self
            .slots
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Slot {slot_id} not found")))?;

        let number = match req.number {
            Some(number) => {
                let number = number.trim().to_string();
                validate_required_text(&number, "number", MAX_NAME_LEN)?;
                Some(number)
            }
            None => None,
        };
        let assigned_to = match req.status {
            Some(SlotStatus::Available) | None => None,
            Some(_) => current.assigned_to.clone(),
        };

        let changes = SlotChanges {
            number,
            status: req.status,
            assigned_to,
        };
        let slot = self.slots.update(&id, changes, now_millis()).await?;

        if req.status.is_some() {
            tracing::info!(
                slot_id = %slot.id,
                from = %current.status,
                to = %slot.status,
                "Slot status updated"
            );
        }
        Ok(slot.into())
    }

    /// Permanently remove a slot
    pub async fn delete_slot(&self, slot_id: &str) -> AppResult<()> {
        let id = parse_record_id("slot", slot_id)?;
        if !self.slots.delete(&id).await? {
            return Err(AppError::not_found(format!("Slot {slot_id} not found")));
        }
        tracing::info!(slot_id = %id, "Slot deleted");
        Ok(())
    }

    /// Reserve against the server's local clock
    pub async fn reserve_slot(&self, slot_id: &str, user: &CurrentUser) -> AppResult<Slot> {
        self.reserve_slot_at(slot_id, user, local_time()).await
    }

    /// Reserve `slot_id` for `user` as of `now`.
    ///
    /// Fails with `ReservationClosed` outside the daily window and with a
    /// validation error when the slot is not AVAILABLE, including when a
    /// concurrent reservation wins the race.
    pub async fn reserve_slot_at(
        &self,
        slot_id: &str,
        user: &CurrentUser,
        now: NaiveTime,
    ) -> AppResult<Slot> {
        if !user.has_role(RESERVER_ROLES) {
            return Err(AppError::forbidden(
                "Only students and teachers can reserve slots",
            ));
        }

        if !self.window.is_open_at(now) {
            return Err(AppError::ReservationClosed(self.window.message_at(now)));
        }

        let id = parse_record_id("slot", slot_id)?;
        let slot = self
            .slots
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Slot {slot_id} not found")))?;
        if slot.status != SlotStatus::Available {
            return Err(AppError::validation(format!(
                "Slot {} is {}",
                slot.number, slot.status
            )));
        }

        let user_id = parse_record_id("user", &user.id)?;
        let reserved = self
            .slots
            .reserve_if_available(&id, &user_id, now_millis())
            .await?
            .ok_or_else(|| {
                AppError::validation(format!("Slot {} is no longer available", slot.number))
            })?;

        tracing::info!(slot_id = %reserved.id, user_id = %user.id, "Slot reserved");
        Ok(reserved.into())
    }
}
