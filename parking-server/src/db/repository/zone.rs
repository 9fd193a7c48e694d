//! Zone Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{NewZone, Zone};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct ZoneRepository {
    base: BaseRepository,
}

impl ZoneRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Zones that are not soft-deleted (or every zone)
    pub async fn find_all(&self, include_deleted: bool) -> RepoResult<Vec<Zone>> {
        let sql = if include_deleted {
            "SELECT * FROM zone ORDER BY created_at"
        } else {
            "SELECT * FROM zone WHERE is_deleted = false ORDER BY created_at"
        };
        let zones: Vec<Zone> = self.base.db().query(sql).await?.take(0)?;
        Ok(zones)
    }

    /// Soft-deleted zones only
    pub async fn find_deleted(&self) -> RepoResult<Vec<Zone>> {
        let zones: Vec<Zone> = self
            .base
            .db()
            .query("SELECT * FROM zone WHERE is_deleted = true ORDER BY updated_at DESC")
            .await?
            .take(0)?;
        Ok(zones)
    }

    /// Find by id, deleted or not
    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Zone>> {
        let zone: Option<Zone> = self.base.db().select(id.clone()).await?;
        Ok(zone)
    }

    pub async fn create(&self, data: NewZone) -> RepoResult<Zone> {
        let created: Option<Zone> = self.base.db().create("zone").content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create zone".to_string()))
    }

    /// Update name and/or description; `None` keeps the stored value
    pub async fn update(
        &self,
        id: &RecordId,
        name: Option<String>,
        description: Option<String>,
        now: i64,
    ) -> RepoResult<Zone> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Zone {id} not found")))?;

        let has_name = name.is_some();
        let has_description = description.is_some();
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $id SET
                    name = IF $has_name THEN $name ELSE name END,
                    description = IF $has_description THEN $description ELSE description END,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("id", id.clone()))
            .bind(("has_name", has_name))
            .bind(("name", name.unwrap_or_default()))
            .bind(("has_description", has_description))
            .bind(("description", description.unwrap_or_default()))
            .bind(("now", now))
            .await?;

        let zones: Vec<Zone> = result.take(0)?;
        zones
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Zone {id} not found")))
    }

    /// Flip the soft-delete flag. Writing the current value again is a no-op
    /// apart from `updated_at`.
    pub async fn set_deleted(&self, id: &RecordId, deleted: bool, now: i64) -> RepoResult<Zone> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Zone {id} not found")))?;

        let mut result = self
            .base
            .db()
            .query("UPDATE $id SET is_deleted = $deleted, updated_at = $now RETURN AFTER")
            .bind(("id", id.clone()))
            .bind(("deleted", deleted))
            .bind(("now", now))
            .await?;

        let zones: Vec<Zone> = result.take(0)?;
        zones
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Zone {id} not found")))
    }
}
