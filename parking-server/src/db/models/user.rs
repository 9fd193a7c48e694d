//! User Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::models::Role;
use surrealdb::RecordId;

/// User ID type
pub type UserId = RecordId;

/// Columns safe to read back for ordinary queries
pub const PUBLIC_FIELDS: &str = "* OMIT hash_pass, otp, otp_expiry";

/// User as read for everything except credential checks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub university_id: Option<String>,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
}

fn default_true() -> bool {
    true
}

/// Credential view, only loaded by the auth service
#[derive(Debug, Clone, Deserialize)]
pub struct UserCredentials {
    pub id: UserId,
    pub role: Role,
    #[serde(
        default = "default_true",
        deserialize_with = "serde_helpers::bool_true"
    )]
    pub is_active: bool,
    pub hash_pass: String,
    #[serde(default)]
    pub otp: Option<String>,
    #[serde(default)]
    pub otp_expiry: Option<i64>,
}

impl UserCredentials {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.hash_pass)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Code matches and has not expired at `now_ms`.
    pub fn otp_valid(&self, code: &str, now_ms: i64) -> bool {
        match (&self.otp, self.otp_expiry) {
            (Some(stored), Some(expiry)) => stored == code.trim() && now_ms < expiry,
            _ => false,
        }
    }
}

/// Hash password using argon2
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

/// Insert payload
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university_id: Option<String>,
    pub hash_pass: String,
    pub is_active: bool,
    pub created_at: i64,
}
