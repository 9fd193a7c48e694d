//! Slot Model

use serde::{Deserialize, Serialize};
use shared::models::SlotStatus;
use surrealdb::RecordId;

pub type SlotId = RecordId;

/// Slot entity, `zone` is a record link to `zone`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub number: String,
    pub zone: RecordId,
    #[serde(default)]
    pub status: SlotStatus,
    #[serde(default)]
    pub assigned_to: Option<RecordId>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Insert payload
#[derive(Debug, Clone, Serialize)]
pub struct NewSlot {
    pub number: String,
    pub zone: RecordId,
    pub status: SlotStatus,
    pub created_at: i64,
    pub updated_at: i64,
}
