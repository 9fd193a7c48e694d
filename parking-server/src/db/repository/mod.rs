//! Repository Module
//!
//! Provides CRUD operations for the SurrealDB tables.

pub mod slot;
pub mod user;
pub mod zone;

// Re-exports
pub use slot::{SlotChanges, SlotRepository};
pub use user::UserRepository;
pub use zone::ZoneRepository;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

use crate::db::models::DeletePolicy;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let message = err.to_string();
        // Unique index violation
        if message.contains("already contains") {
            return RepoError::Duplicate(message);
        }
        RepoError::Database(message)
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:id" 格式
// =============================================================================
//
// API 层传入的 ID 可以是 "zone:abc" 或裸 key "abc"，统一经
// `parse_record_id` 转成 RecordId；表名不符视为不存在。

/// Parse an API id for `table`.
pub fn parse_record_id(table: &str, raw: &str) -> RepoResult<RecordId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(RepoError::Validation(format!("Missing {table} id")));
    }
    if raw.contains(':') {
        let id: RecordId = raw
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {raw}")))?;
        if id.table() != table {
            return Err(RepoError::NotFound(format!("{raw} is not a {table}")));
        }
        return Ok(id);
    }
    Ok(RecordId::from_table_key(table, raw))
}

/// Aggregate row for `SELECT count() ... GROUP ALL`
#[derive(Debug, Deserialize)]
pub(crate) struct CountRow {
    pub count: i64,
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }

    /// Permanently remove a record. Only entities without restore support
    /// may be hard-deleted; anything else fails to compile.
    pub async fn hard_delete<T>(&self, id: &RecordId) -> RepoResult<bool>
    where
        T: DeletePolicy + DeserializeOwned,
    {
        const {
            assert!(
                !T::SUPPORTS_RESTORE,
                "restorable entities must be soft-deleted"
            )
        };
        let deleted: Option<T> = self.db.delete(id.clone()).await?;
        Ok(deleted.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_key_gets_table() {
        let id = parse_record_id("zone", "north").unwrap();
        assert_eq!(id.table(), "zone");
        assert_eq!(id.to_string(), "zone:north");
    }

    #[test]
    fn prefixed_id_must_match_table() {
        assert!(parse_record_id("zone", "zone:north").is_ok());
        assert!(matches!(
            parse_record_id("zone", "slot:a7"),
            Err(RepoError::NotFound(_))
        ));
        assert!(matches!(
            parse_record_id("zone", "  "),
            Err(RepoError::Validation(_))
        ));
    }
}
