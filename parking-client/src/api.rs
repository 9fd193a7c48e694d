//! The server operations the reconcilers depend on
//!
//! [`crate::HttpClient`] is the network implementation; tests plug in an
//! in-memory one.

use async_trait::async_trait;
use shared::models::{
    AdminSummary, AdminToggled, Slot, SlotStatus, UserCreate, UserInfo, Zone, ZoneDeleted,
};

use crate::ClientResult;

#[async_trait]
pub trait ParkingApi: Send + Sync {
    // ========== Zones ==========
    async fn list_zones(&self, include_deleted: bool) -> ClientResult<Vec<Zone>>;
    async fn list_deleted_zones(&self) -> ClientResult<Vec<Zone>>;
    async fn create_zone(&self, name: &str, description: Option<&str>) -> ClientResult<Zone>;
    async fn update_zone(&self, id: &str, name: &str) -> ClientResult<Zone>;
    async fn delete_zone(&self, id: &str) -> ClientResult<ZoneDeleted>;
    async fn restore_zone(&self, id: &str) -> ClientResult<Zone>;

    // ========== Slots ==========
    async fn list_slots(&self, zone: Option<&str>) -> ClientResult<Vec<Slot>>;
    async fn create_slot(&self, zone: &str, number: &str) -> ClientResult<Slot>;
    async fn update_slot_status(&self, id: &str, status: SlotStatus) -> ClientResult<Slot>;
    async fn reserve_slot(&self, id: &str) -> ClientResult<Slot>;
    async fn delete_slot(&self, id: &str) -> ClientResult<()>;

    // ========== Owner ==========
    async fn list_admins(&self) -> ClientResult<Vec<AdminSummary>>;
    async fn toggle_admin(&self, id: &str) -> ClientResult<AdminToggled>;
    async fn delete_admin(&self, id: &str) -> ClientResult<()>;
    async fn create_admin(&self, req: &UserCreate) -> ClientResult<UserInfo>;
}
