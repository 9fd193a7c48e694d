//! User Model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account role (closed set)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Owner,
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Owner, Role::Admin, Role::Teacher, Role::Student];

    /// Roles that manage zones and slots.
    pub const PARKING_MANAGERS: [Role; 2] = [Role::Owner, Role::Admin];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Owner => "OWNER",
            Role::Admin => "ADMIN",
            Role::Teacher => "TEACHER",
            Role::Student => "STUDENT",
        }
    }

    /// Roles a visitor may pick when registering themselves.
    pub fn is_self_registrable(self) -> bool {
        match self {
            Role::Teacher | Role::Student => true,
            Role::Owner | Role::Admin => false,
        }
    }


    /// Prefix used in generated university ids (`UNI-ADM-0001`).
    pub fn university_prefix(self) -> &'static str {
        match self {
            Role::Owner => "OWN",
            Role::Admin => "ADM",
            Role::Teacher => "TEA",
            Role::Student => "STD",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseRoleError(s.to_string()))
    }
}

/// User information (never carries credentials)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university_id: Option<String>,
    pub is_active: bool,
}

/// Admin roster row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub enabled: bool,
}

impl From<UserInfo> for AdminSummary {
    fn from(user: UserInfo) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            enabled: user.is_active,
        }
    }
}

/// Owner account provisioning payload
///
/// `role` may be `ADMIN` or `TEACHER`; missing means `ADMIN`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

/// Toggle acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminToggled {
    pub message: String,
    pub enabled: bool,
}

/// Activate / deactivate any non-owner account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatusUpdate {
    pub is_active: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), "\"TEACHER\"");
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert!("JANITOR".parse::<Role>().is_err());
    }

    #[test]
    fn only_teacher_and_student_self_register() {
        let open: Vec<_> = Role::ALL
            .into_iter()
            .filter(|r| r.is_self_registrable())
            .collect();
        assert_eq!(open, vec![Role::Teacher, Role::Student]);
    }

    #[test]
    fn parking_managers_cannot_self_register() {
        assert_eq!(Role::PARKING_MANAGERS, [Role::Owner, Role::Admin]);
        assert!(Role::PARKING_MANAGERS.iter().all(|r| !r.is_self_registrable()));
    }

    #[test]
    fn admin_summary_maps_active_flag() {
        let summary = AdminSummary::from(UserInfo {
            id: "user:1".into(),
            name: "Ada".into(),
            email: "ada@campus.edu".into(),
            role: Role::Admin,
            university_id: Some("UNI-ADM-0001".into()),
            is_active: false,
        });
        assert!(!summary.enabled);
        assert_eq!(summary.email, "ada@campus.edu");
    }
}
