//! Slot Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{NewSlot, Slot};
use shared::models::SlotStatus;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

/// Fields written by [`SlotRepository::update`]
///
/// `assigned_to` is only written together with `status`.
#[derive(Debug, Default)]
pub struct SlotChanges {
    pub number: Option<String>,
    pub status: Option<SlotStatus>,
    pub assigned_to: Option<RecordId>,
}

#[derive(Clone)]
pub struct SlotRepository {
    base: BaseRepository,
}

impl SlotRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Slot>> {
        let slots: Vec<Slot> = self
            .base
            .db()
            .query("SELECT * FROM slot ORDER BY number")
            .await?
            .take(0)?;
        Ok(slots)
    }

    pub async fn find_by_zone(&self, zone: &RecordId) -> RepoResult<Vec<Slot>> {
        let slots: Vec<Slot> = self
            .base
            .db()
            .query("SELECT * FROM slot WHERE zone = $zone ORDER BY number")
            .bind(("zone", zone.clone()))
            .await?
            .take(0)?;
        Ok(slots)
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<Slot>> {
        let slot: Option<Slot> = self.base.db().select(id.clone()).await?;
        Ok(slot)
    }

    pub async fn create(&self, data: NewSlot) -> RepoResult<Slot> {
        let created: Option<Slot> = self.base.db().create("slot").content(data).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create slot".to_string()))
    }

    /// Apply `changes` in one write, refreshing `updated_at`
    pub async fn update(&self, id: &RecordId, changes: SlotChanges, now: i64) -> RepoResult<Slot> {
        let mut fields = vec!["updated_at = $now"];
        if changes.number.is_some() {
            fields.push("number = $number");
        }
        if changes.status.is_some() {
            fields.push("status = $status");
            fields.push("assigned_to = $assigned_to");
        }

        let mut result = self
            .base
            .db()
            .query(format!("UPDATE $id SET {} RETURN AFTER", fields.join(", ")))
            .bind(("id", id.clone()))
            .bind(("number", changes.number))
            .bind(("status", changes.status))
            .bind(("assigned_to", changes.assigned_to))
            .bind(("now", now))
            .await?;

        let slots: Vec<Slot> = result.take(0)?;
        slots
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Slot {id} not found")))
    }

    /// Reserve only if the slot is still AVAILABLE; `None` means someone
    /// else got there first (or the slot left AVAILABLE).
    pub async fn reserve_if_available(
        &self,
        id: &RecordId,
        user: &RecordId,
        now: i64,
    ) -> RepoResult<Option<Slot>> {
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $id SET
                    status = $reserved,
                    assigned_to = $user,
                    updated_at = $now
                WHERE status = $available
                RETURN AFTER"#,
            )
            .bind(("id", id.clone()))
            .bind(("reserved", SlotStatus::Reserved))
            .bind(("available", SlotStatus::Available))
            .bind(("user", user.clone()))
            .bind(("now", now))
            .await?;

        let slots: Vec<Slot> = result.take(0)?;
        Ok(slots.into_iter().next())
    }

    /// Hard delete
    pub async fn delete(&self, id: &RecordId) -> RepoResult<bool> {
        self.base.hard_delete::<Slot>(id).await
    }
}
