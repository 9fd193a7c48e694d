//! Owner's admin list

use shared::models::{AdminSummary, Role, UserCreate, UserInfo};

use super::{BannerMode, ErrorBanner, Report, optimistic_apply};
use crate::ClientResult;
use crate::api::ParkingApi;

pub struct AdminRoster<A> {
    api: A,
    admins: Vec<AdminSummary>,
    banner: ErrorBanner,
}

impl<A: ParkingApi> AdminRoster<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            admins: Vec::new(),
            banner: ErrorBanner::new(),
        }
    }

    pub async fn load(&mut self) -> ClientResult<()> {
        match self.api.list_admins().await {
            Ok(admins) => {
                self.admins = admins;
                Ok(())
            }
            Err(e) => {
                self.banner
                    .raise(e.user_message("Failed to load admins"), BannerMode::Transient);
                Err(e)
            }
        }
    }

    /// Flip `enabled` locally, then ask the server. The last-active-admin
    /// refusal comes back as an error and rolls the flip back.
    pub async fn toggle(&mut self, admin_id: &str) -> ClientResult<bool> {
        let toggled = optimistic_apply(
            &mut self.admins,
            &mut self.banner,
            Report::transient("Failed to toggle admin status"),
            |admins| {
                if let Some(admin) = admins.iter_mut().find(|a| a.id == admin_id) {
                    admin.enabled = !admin.enabled;
                }
            },
            self.api.toggle_admin(admin_id),
            |admins, ack| {
                if let Some(admin) = admins.iter_mut().find(|a| a.id == admin_id) {
                    admin.enabled = ack.enabled;
                }
            },
        )
        .await?;
        Ok(toggled.enabled)
    }

    pub async fn delete(&mut self, admin_id: &str) -> ClientResult<()> {
        optimistic_apply(
            &mut self.admins,
            &mut self.banner,
            Report::transient("Failed to delete admin"),
            |admins| admins.retain(|a| a.id != admin_id),
            self.api.delete_admin(admin_id),
            |_, _| {},
        )
        .await
    }

    /// Form submission; nothing is shown until the server assigns an id
    pub async fn create(&mut self, req: &UserCreate) -> ClientResult<UserInfo> {
        optimistic_apply(
            &mut self.admins,
            &mut self.banner,
            Report::persistent("Failed to create admin"),
            |_| {},
            self.api.create_admin(req),
            |admins, user| {
                if user.role == Role::Admin {
                    admins.push(AdminSummary::from(user.clone()));
                }
            },
        )
        .await
    }

    pub fn admins(&self) -> &[AdminSummary] {
        &self.admins
    }

    pub fn total(&self) -> usize {
        self.admins.len()
    }

    pub fn active(&self) -> usize {
        self.admins.iter().filter(|a| a.enabled).count()
    }

    pub fn banner(&self) -> &ErrorBanner {
        &self.banner
    }

    pub fn api(&self) -> &A {
        &self.api
    }
}
