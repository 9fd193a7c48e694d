//! Zones and slots as the parking dashboard sees them

use chrono::NaiveTime;
use shared::ReservationWindow;
use shared::models::{DeletePolicy, Slot, SlotStatus, Zone};
use uuid::Uuid;

use super::{BannerMode, ErrorBanner, Report, optimistic_apply};
use crate::api::ParkingApi;
use crate::notifications::{Notification, NotificationFeed, Severity};
use crate::{ClientError, ClientResult};

/// Local ids for rows the server has not confirmed yet
const PENDING_PREFIX: &str = "pending-";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardState {
    pub zones: Vec<Zone>,
    pub slots: Vec<Slot>,
}

impl BoardState {
    fn zone(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.id == id)
    }

    fn slot(&self, id: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.id == id)
    }

    fn put_zone(&mut self, id: &str, zone: Zone) {
        match self.zones.iter_mut().find(|z| z.id == id) {
            Some(existing) => *existing = zone,
            None => self.zones.push(zone),
        }
    }

    fn put_slot(&mut self, id: &str, slot: Slot) {
        match self.slots.iter_mut().find(|s| s.id == id) {
            Some(existing) => *existing = slot,
            None => self.slots.push(slot),
        }
    }

    fn patch_slot(&mut self, id: &str, f: impl FnOnce(&mut Slot)) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.id == id) {
            f(slot);
        }
    }
}

pub struct ParkingBoard<A> {
    api: A,
    state: BoardState,
    banner: ErrorBanner,
    notifications: NotificationFeed,
    window: ReservationWindow,
    recently_deleted: Option<Zone>,
}

impl<A: ParkingApi> ParkingBoard<A> {
    pub fn new(api: A) -> Self {
        Self::with_window(api, ReservationWindow::default())
    }

    pub fn with_window(api: A, window: ReservationWindow) -> Self {
        Self {
            api,
            state: BoardState::default(),
            banner: ErrorBanner::new(),
            notifications: NotificationFeed::new(),
            window,
            recently_deleted: None,
        }
    }

    /// Replace local state with the server's visible zones and all slots
    pub async fn refresh(&mut self) -> ClientResult<()> {
        let loaded = async {
            let zones = self.api.list_zones(false).await?;
            let slots = self.api.list_slots(None).await?;
            Ok::<_, ClientError>(BoardState { zones, slots })
        }
        .await;

        match loaded {
            Ok(state) => {
                tracing::debug!(zones = state.zones.len(), slots = state.slots.len(), "Board refreshed");
                self.state = state;
                Ok(())
            }
            Err(e) => {
                self.banner.raise(
                    e.user_message("Failed to load parking data"),
                    BannerMode::Transient,
                );
                Err(e)
            }
        }
    }

    /// Shows a placeholder row until the server answers with the real zone
    pub async fn add_zone(&mut self, name: &str, description: Option<&str>) -> ClientResult<Zone> {
        let pending_id = format!("{PENDING_PREFIX}{}", Uuid::new_v4());
        let placeholder = Zone {
            id: pending_id.clone(),
            name: name.to_string(),
            description: description.unwrap_or_default().to_string(),
            is_deleted: false,
            created_at: 0,
            updated_at: 0,
        };

        optimistic_apply(
            &mut self.state,
            &mut self.banner,
            Report::persistent("Failed to create block"),
            |s| s.zones.push(placeholder),
            self.api.create_zone(name, description),
            |s, zone| s.put_zone(&pending_id, zone.clone()),
        )
        .await
    }

    pub async fn rename_zone(&mut self, zone_id: &str, name: &str) -> ClientResult<Zone> {
        if self.state.zone(zone_id).is_none() {
            return Err(ClientError::NotFound(zone_id.to_string()));
        }

        optimistic_apply(
            &mut self.state,
            &mut self.banner,
            Report::transient("Failed to rename block"),
            |s| {
                if let Some(zone) = s.zones.iter_mut().find(|z| z.id == zone_id) {
                    zone.name = name.to_string();
                }
            },
            self.api.update_zone(zone_id, name),
            |s, zone| s.put_zone(zone_id, zone.clone()),
        )
        .await
    }

    /// Soft-delete a zone.
    ///
    /// Refused locally, with no request, while any of its slots is reserved
    /// or occupied. Slots of a deleted zone stay in local state. An undo
    /// notification is offered when zones are restorable.
    pub async fn remove_zone(&mut self, zone_id: &str) -> ClientResult<Zone> {
        if self.state.zone(zone_id).is_none() {
            return Err(ClientError::NotFound(zone_id.to_string()));
        }
        let busy = self
            .state
            .slots
            .iter()
            .any(|s| s.zone == zone_id && s.status.is_in_use());
        if busy {
            let err = ClientError::ZoneInUse {
                zone: zone_id.to_string(),
            };
            self.banner
                .raise(err.user_message("Failed to delete block"), BannerMode::Transient);
            return Err(err);
        }

        let deleted = optimistic_apply(
            &mut self.state,
            &mut self.banner,
            Report::transient("Failed to delete block"),
            |s| s.zones.retain(|z| z.id != zone_id),
            self.api.delete_zone(zone_id),
            |_, _| {},
        )
        .await?;

        if Zone::SUPPORTS_RESTORE {
            self.notifications.push(
                Notification::new(
                    "Block deleted",
                    "Click Undo to restore this block",
                    Severity::Warning,
                )
                .with_zone(zone_id),
            );
            self.recently_deleted = Some(deleted.zone.clone());
        }
        Ok(deleted.zone)
    }

    /// Undo a soft delete
    pub async fn restore_zone(&mut self, zone_id: &str) -> ClientResult<Zone> {
        let known = self
            .recently_deleted
            .as_ref()
            .filter(|z| z.id == zone_id)
            .cloned();

        let zone = optimistic_apply(
            &mut self.state,
            &mut self.banner,
            Report::transient("Failed to restore block"),
            |s| {
                if let Some(mut zone) = known {
                    zone.is_deleted = false;
                    s.put_zone(zone_id, zone);
                }
            },
            self.api.restore_zone(zone_id),
            |s, zone| s.put_zone(zone_id, zone.clone()),
        )
        .await?;

        if self.recently_deleted.as_ref().is_some_and(|z| z.id == zone_id) {
            self.recently_deleted = None;
        }
        Ok(zone)
    }

    pub async fn add_slot(&mut self, zone_id: &str, number: &str) -> ClientResult<Slot> {
        let pending_id = format!("{PENDING_PREFIX}{}", Uuid::new_v4());
        let placeholder = Slot {
            id: pending_id.clone(),
            number: number.to_string(),
            zone: zone_id.to_string(),
            status: SlotStatus::Available,
            assigned_to: None,
            created_at: 0,
            updated_at: 0,
        };

        optimistic_apply(
            &mut self.state,
            &mut self.banner,
            Report::persistent("Failed to create slot"),
            |s| s.slots.push(placeholder),
            self.api.create_slot(zone_id, number),
            |s, slot| s.put_slot(&pending_id, slot.clone()),
        )
        .await
    }

    pub async fn remove_slot(&mut self, slot_id: &str) -> ClientResult<()> {
        optimistic_apply(
            &mut self.state,
            &mut self.banner,
            Report::transient("Failed to delete slot"),
            |s| s.slots.retain(|slot| slot.id != slot_id),
            self.api.delete_slot(slot_id),
            |_, _| {},
        )
        .await
    }

    /// Admin status overwrite.
    ///
    /// A successful OCCUPIED -> AVAILABLE change pushes one
    /// "Parking Spot Free!" notification naming the slot and its zone.
    pub async fn update_slot_status(
        &mut self,
        slot_id: &str,
        status: SlotStatus,
    ) -> ClientResult<Slot> {
        let previous = self
            .state
            .slot(slot_id)
            .map(|s| s.status)
            .ok_or_else(|| ClientError::NotFound(slot_id.to_string()))?;

        let slot = optimistic_apply(
            &mut self.state,
            &mut self.banner,
            Report::transient("Failed to update slot status"),
            |s| {
                s.patch_slot(slot_id, |slot| {
                    slot.status = status;
                    if status == SlotStatus::Available {
                        slot.assigned_to = None;
                    }
                })
            },
            self.api.update_slot_status(slot_id, status),
            |s, slot| s.put_slot(slot_id, slot.clone()),
        )
        .await?;

        if previous == SlotStatus::Occupied && slot.status == SlotStatus::Available {
            let zone_name = self
                .state
                .zone(&slot.zone)
                .map(|z| z.name.as_str())
                .unwrap_or("Campus");
            let message = format!("Slot {} in {} is now available.", slot.number, zone_name);
            self.notifications.push(
                Notification::new("Parking Spot Free!", message, Severity::Success)
                    .with_zone(slot.zone.clone()),
            );
        }
        Ok(slot)
    }

    /// Reserve for the signed-in user, checked against the window first
    pub async fn reserve_slot(&mut self, slot_id: &str, now: NaiveTime) -> ClientResult<Slot> {
        if !self.window.is_open_at(now) {
            let err = ClientError::ReservationClosed(self.window.message_at(now));
            self.banner
                .raise(err.user_message("Failed to reserve slot"), BannerMode::Transient);
            return Err(err);
        }
        if self.state.slot(slot_id).is_none() {
            return Err(ClientError::NotFound(slot_id.to_string()));
        }

        optimistic_apply(
            &mut self.state,
            &mut self.banner,
            Report::transient("Failed to reserve slot"),
            |s| s.patch_slot(slot_id, |slot| slot.status = SlotStatus::Reserved),
            self.api.reserve_slot(slot_id),
            |s, slot| s.put_slot(slot_id, slot.clone()),
        )
        .await
    }

    /// (available, total) slots of a zone
    pub fn zone_availability(&self, zone_id: &str) -> (usize, usize) {
        self.state
            .slots
            .iter()
            .filter(|s| s.zone == zone_id)
            .fold((0, 0), |(available, total), s| {
                let free = usize::from(s.status == SlotStatus::Available);
                (available + free, total + 1)
            })
    }

    /// Window banner text, e.g. "RESERVATIONS OPEN"
    pub fn reservation_status(&self, now: NaiveTime) -> String {
        self.window.message_at(now)
    }

    pub fn can_reserve(&self, now: NaiveTime) -> bool {
        self.window.is_open_at(now)
    }

    pub fn zones(&self) -> &[Zone] {
        &self.state.zones
    }

    pub fn slots(&self) -> &[Slot] {
        &self.state.slots
    }

    pub fn slots_in<'a>(&'a self, zone_id: &'a str) -> impl Iterator<Item = &'a Slot> + 'a {
        self.state.slots.iter().filter(move |s| s.zone == zone_id)
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn banner(&self) -> &ErrorBanner {
        &self.banner
    }

    pub fn banner_mut(&mut self) -> &mut ErrorBanner {
        &mut self.banner
    }

    pub fn notifications(&self) -> &NotificationFeed {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationFeed {
        &mut self.notifications
    }

    /// Last zone removed through [`Self::remove_zone`], for undo
    pub fn recently_deleted(&self) -> Option<&Zone> {
        self.recently_deleted.as_ref()
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}
