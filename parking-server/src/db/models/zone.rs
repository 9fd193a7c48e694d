//! Zone Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

pub type ZoneId = RecordId;

/// Zone entity (停车区域)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    #[serde(default, deserialize_with = "serde_helpers::string_or_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_deleted: bool,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Insert payload
#[derive(Debug, Clone, Serialize)]
pub struct NewZone {
    pub name: String,
    pub description: String,
    pub is_deleted: bool,
    pub created_at: i64,
    pub updated_at: i64,
}
