//! User Repository

use super::{BaseRepository, CountRow, RepoError, RepoResult};
use crate::db::models::user::PUBLIC_FIELDS;
use crate::db::models::{NewUser, User, UserCredentials};
use shared::models::Role;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

/// Name of the unique index on `user.email` in the schema
const EMAIL_INDEX: &str = "user_email";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All users, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query(format!(
                "SELECT {PUBLIC_FIELDS} FROM user ORDER BY created_at DESC"
            ))
            .await?
            .take(0)?;
        Ok(users)
    }

    /// Users with the given role, newest first
    pub async fn find_by_role(&self, role: Role) -> RepoResult<Vec<User>> {
        let users: Vec<User> = self
            .base
            .db()
            .query(format!(
                "SELECT {PUBLIC_FIELDS} FROM user WHERE role = $role ORDER BY created_at DESC"
            ))
            .bind(("role", role))
            .await?
            .take(0)?;
        Ok(users)
    }

    pub async fn find_by_id(&self, id: &RecordId) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query(format!("SELECT {PUBLIC_FIELDS} FROM $id"))
            .bind(("id", id.clone()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// `email` must already be normalized
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {PUBLIC_FIELDS} FROM user WHERE email = $email LIMIT 1"
            ))
            .bind(("email", email.to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    pub async fn find_by_university_id(&self, university_id: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "SELECT {PUBLIC_FIELDS} FROM user WHERE university_id = $uid LIMIT 1"
            ))
            .bind(("uid", university_id.to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Credential lookup, only for the auth service
    pub async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> RepoResult<Option<UserCredentials>> {
        let mut result = self
            .base
            .db()
            .query("SELECT id, role, is_active, hash_pass, otp, otp_expiry FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let users: Vec<UserCredentials> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    pub async fn find_credentials_by_id(
        &self,
        id: &RecordId,
    ) -> RepoResult<Option<UserCredentials>> {
        let mut result = self
            .base
            .db()
            .query("SELECT id, role, is_active, hash_pass, otp, otp_expiry FROM $id")
            .bind(("id", id.clone()))
            .await?;
        let users: Vec<UserCredentials> = result.take(0)?;
        Ok(users.into_iter().next())
    }

    /// Insert a user; email must be unique
    pub async fn create(&self, data: NewUser) -> RepoResult<User> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' is already registered",
                data.email
            )));
        }

        let email = data.email.clone();
        let created: Option<User> = self
            .base
            .db()
            .create("user")
            .content(data)
            .await
            .map_err(|e| match RepoError::from(e) {
                RepoError::Duplicate(msg) if msg.contains(EMAIL_INDEX) => {
                    RepoError::Duplicate(format!("Email '{email}' is already registered"))
                }
                RepoError::Duplicate(msg) => RepoError::Database(msg),
                other => other,
            })?;
        created.ok_or_else(|| RepoError::Database("Failed to create user".to_string()))
    }

    pub async fn count_by_role(&self, role: Role) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM user WHERE role = $role GROUP ALL")
            .bind(("role", role))
            .await?;
        let row: Option<CountRow> = result.take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }

    pub async fn count_active_by_role(&self, role: Role) -> RepoResult<i64> {
        let mut result = self
            .base
            .db()
            .query("SELECT count() FROM user WHERE role = $role AND is_active = true GROUP ALL")
            .bind(("role", role))
            .await?;
        let row: Option<CountRow> = result.take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }

    pub async fn set_active(&self, id: &RecordId, active: bool) -> RepoResult<User> {
        let mut result = self
            .base
            .db()
            .query(format!(
                "UPDATE $id SET is_active = $active RETURN NONE; SELECT {PUBLIC_FIELDS} FROM $id"
            ))
            .bind(("id", id.clone()))
            .bind(("active", active))
            .await?;
        let users: Vec<User> = result.take(1)?;
        users
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
    }

    pub async fn set_password(&self, id: &RecordId, hash_pass: String) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $id SET hash_pass = $hash_pass")
            .bind(("id", id.clone()))
            .bind(("hash_pass", hash_pass))
            .await?
            .check()?;
        Ok(())
    }

    pub async fn set_otp(&self, id: &RecordId, otp: String, expiry_ms: i64) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $id SET otp = $otp, otp_expiry = $expiry")
            .bind(("id", id.clone()))
            .bind(("otp", otp))
            .bind(("expiry", expiry_ms))
            .await?
            .check()?;
        Ok(())
    }

    /// Replace the password and invalidate any outstanding OTP
    pub async fn reset_password(&self, id: &RecordId, hash_pass: String) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE $id SET hash_pass = $hash_pass, otp = NONE, otp_expiry = NONE")
            .bind(("id", id.clone()))
            .bind(("hash_pass", hash_pass))
            .await?
            .check()?;
        Ok(())
    }

    /// Hard delete
    pub async fn delete(&self, id: &RecordId) -> RepoResult<bool> {
        self.base.hard_delete::<User>(id).await
    }
}
