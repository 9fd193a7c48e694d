//! Null-tolerant field decoding
//!
//! Rows written before a field existed come back from SurrealDB with
//! `NONE`/`null` in its place.

use serde::{Deserialize, Deserializer};

/// `null` reads as `true` (accounts without a flag are active)
pub fn bool_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(true))
}

/// `null` reads as `false` (zones without a flag are visible)
pub fn bool_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(false))
}

/// `null` reads as `""`
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "super::bool_true")]
        is_active: bool,
        #[serde(default, deserialize_with = "super::bool_false")]
        is_deleted: bool,
        #[serde(default, deserialize_with = "super::string_or_empty")]
        description: String,
    }

    #[test]
    fn nulls_take_field_defaults() {
        let row: Row = serde_json::from_str(
            r#"{"is_active": null, "is_deleted": null, "description": null}"#,
        )
        .unwrap();
        assert!(row.is_active);
        assert!(!row.is_deleted);
        assert_eq!(row.description, "");
    }

    #[test]
    fn explicit_values_win() {
        let row: Row = serde_json::from_str(
            r#"{"is_active": false, "is_deleted": true, "description": "Level 2"}"#,
        )
        .unwrap();
        assert!(!row.is_active);
        assert!(row.is_deleted);
        assert_eq!(row.description, "Level 2");
    }
}
