//! Admin Provisioning Service
//!
//! Owner-side account management. Every operation that can lower the number
//! of active admins runs under [`ServerState::admin_lock`], so the
//! "at least one active admin" check and the write it guards cannot
//! interleave with another toggle/delete.

use std::sync::Arc;

use shared::models::{AdminSummary, Role, UserCreate, UserInfo};
use surrealdb::RecordId;
use tokio::sync::Mutex;

use crate::api::convert::convert_all;
use crate::core::ServerState;
use crate::db::models::User;
use crate::db::repository::{UserRepository, parse_record_id};
use crate::security_log;
use crate::services::AuthService;
use crate::utils::{AppError, AppResult};

const LAST_ADMIN_ACTIVE: &str = "At least one admin must remain active";
const LAST_ADMIN_DELETE: &str = "Cannot delete the last active admin";

/// Next free `UNI-<prefix>-NNNN` for `role`.
///
/// Starts at (number of users with that role) + 1 and walks forward past
/// ids already taken, which happens once an account has been deleted.
pub async fn next_university_id(users: &UserRepository, role: Role) -> AppResult<String> {
    let mut n = users.count_by_role(role).await? + 1;
    loop {
        let candidate = format!("UNI-{}-{:04}", role.university_prefix(), n);
        if users.find_by_university_id(&candidate).await?.is_none() {
            return Ok(candidate);
        }
        n += 1;
    }
}

#[derive(Clone)]
pub struct AdminService {
    users: UserRepository,
    auth: AuthService,
    lock: Arc<Mutex<()>>,
}

impl AdminService {
    pub fn new(state: &ServerState) -> Self {
        Self {
            users: UserRepository::new(state.get_db()),
            auth: AuthService::new(state),
            lock: state.admin_lock.clone(),
        }
    }

    /// Owner provisioning: ADMIN (default) or TEACHER accounts
    pub async fn create_user(&self, req: UserCreate) -> AppResult<UserInfo> {
        let role = req.role.unwrap_or(Role::Admin);
        if !matches!(role, Role::Admin | Role::Teacher) {
            return Err(AppError::validation(format!(
                "Owner can only create ADMIN or TEACHER accounts, got {role}"
            )));
        }

        let user = self
            .auth
            .create_user(&req.name, &req.email, &req.password, role)
            .await?;
        tracing::info!(user_id = %user.id, role = %user.role, "User provisioned by owner");
        Ok(user.into())
    }

    pub async fn list_admins(&self) -> AppResult<Vec<AdminSummary>> {
        let admins = self.users.find_by_role(Role::Admin).await?;
        Ok(convert_all(admins))
    }

    pub async fn list_users(&self) -> AppResult<Vec<UserInfo>> {
        let users = self.users.find_all().await?;
        Ok(convert_all(users))
    }

    /// Flip an admin's `is_active`. Returns the new value.
    pub async fn toggle_admin_status(&self, admin_id: &str) -> AppResult<bool> {
        let _guard = self.lock.lock().await;

        let admin = self.find_admin(admin_id).await?;
        if admin.is_active {
            self.ensure_not_last_active(&admin, LAST_ADMIN_ACTIVE).await?;
        }

        let updated = self.users.set_active(&admin.id, !admin.is_active).await?;
        security_log!(
            "INFO",
            "admin_status_toggled",
            admin_id = updated.id.to_string(),
            enabled = updated.is_active
        );
        Ok(updated.is_active)
    }

    /// Set `is_active` on any account except the owner's
    pub async fn set_user_status(&self, user_id: &str, active: bool) -> AppResult<UserInfo> {
        let _guard = self.lock.lock().await;

        let id = parse_record_id("user", user_id)?;
        let user = self
            .users
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if user.role == Role::Owner {
            return Err(AppError::validation("Owner account status cannot be changed"));
        }
        if user.role == Role::Admin && user.is_active && !active {
            self.ensure_not_last_active(&user, LAST_ADMIN_ACTIVE).await?;
        }

        let updated = self.users.set_active(&id, active).await?;
        security_log!(
            "INFO",
            "user_status_set",
            user_id = updated.id.to_string(),
            active = updated.is_active
        );
        Ok(updated.into())
    }

    /// Permanently remove an admin account
    pub async fn delete_admin(&self, admin_id: &str) -> AppResult<()> {
        let _guard = self.lock.lock().await;

        let admin = self.find_admin(admin_id).await?;
        if admin.is_active {
            self.ensure_not_last_active(&admin, LAST_ADMIN_DELETE).await?;
        }

        if !self.users.delete(&admin.id).await? {
            return Err(AppError::not_found("Admin not found"));
        }
        security_log!("INFO", "admin_deleted", admin_id = admin.id.to_string());
        Ok(())
    }

    async fn find_admin(&self, admin_id: &str) -> AppResult<User> {
        let id: RecordId = parse_record_id("user", admin_id)?;
        match self.users.find_by_id(&id).await? {
            Some(user) if user.role == Role::Admin => Ok(user),
            _ => Err(AppError::not_found("Admin not found")),
        }
    }

    /// Caller must hold the admin lock
    async fn ensure_not_last_active(&self, admin: &User, message: &str) -> AppResult<()> {
        let active = self.users.count_active_by_role(Role::Admin).await?;
        if active <= 1 {
            security_log!(
                "WARN",
                "last_admin_guard",
                admin_id = admin.id.to_string(),
                active_admins = active
            );
            return Err(AppError::LastAdminGuard(message.to_string()));
        }
        Ok(())
    }
}
