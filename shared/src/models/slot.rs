//! Slot Model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Occupancy status of a single parking slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SlotStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Maintenance,
}

impl SlotStatus {
    pub const ALL: [SlotStatus; 4] = [
        SlotStatus::Available,
        SlotStatus::Occupied,
        SlotStatus::Reserved,
        SlotStatus::Maintenance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SlotStatus::Available => "AVAILABLE",
            SlotStatus::Occupied => "OCCUPIED",
            SlotStatus::Reserved => "RESERVED",
            SlotStatus::Maintenance => "MAINTENANCE",
        }
    }

    /// Someone holds or uses the slot right now.
    pub fn is_in_use(self) -> bool {
        match self {
            SlotStatus::Occupied | SlotStatus::Reserved => true,
            SlotStatus::Available | SlotStatus::Maintenance => false,
        }
    }
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid slot status: {0}")]
pub struct ParseSlotStatusError(pub String);

impl FromStr for SlotStatus {
    type Err = ParseSlotStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlotStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSlotStatusError(s.to_string()))
    }
}

/// Slot entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub id: String,
    /// Display label, e.g. `A-7`
    pub number: String,
    /// Zone reference ("zone:xxx")
    pub zone: String,
    #[serde(default)]
    pub status: SlotStatus,
    /// User reference of whoever reserved the slot
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default)]
    pub created_at: i64,
    #[serde(default)]
    pub updated_at: i64,
}

/// Create slot payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotCreate {
    pub number: String,
    /// Zone reference ("zone:xxx")
    pub zone: String,
}

/// Update slot payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SlotUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SlotStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_uppercase_wire_names() {
        let json = serde_json::to_string(&SlotStatus::Maintenance).unwrap();
        assert_eq!(json, "\"MAINTENANCE\"");
        let parsed: SlotStatus = serde_json::from_str("\"RESERVED\"").unwrap();
        assert_eq!(parsed, SlotStatus::Reserved);
        assert!(serde_json::from_str::<SlotStatus>("\"BROKEN\"").is_err());
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!("occupied".parse::<SlotStatus>(), Ok(SlotStatus::Occupied));
        assert!("parked".parse::<SlotStatus>().is_err());
    }

    #[test]
    fn in_use_covers_occupied_and_reserved() {
        let busy: Vec<_> = SlotStatus::ALL.into_iter().filter(|s| s.is_in_use()).collect();
        assert_eq!(busy, vec![SlotStatus::Occupied, SlotStatus::Reserved]);
    }

    #[test]
    fn slot_json_is_camel_case() {
        let slot = Slot {
            id: "slot:a7".into(),
            number: "A-7".into(),
            zone: "zone:north".into(),
            status: SlotStatus::Available,
            assigned_to: None,
            created_at: 1,
            updated_at: 2,
        };
        let value = serde_json::to_value(&slot).unwrap();
        assert_eq!(value["updatedAt"], 2);
        assert!(value.get("assignedTo").is_none());
    }
}
